//! 关节限位
//!
//! IRB 14000 单臂 7 关节的出厂限位（度，转换为弧度后双臂复用同一组），
//! 加上夹爪行程限位 `[0, 0.025]` 米，构成 18 维上下界向量。

use crate::state::POSE_DOF;

/// 单臂关节上限（度）
const ARM_UPPER_DEG: [f64; 7] = [168.5, 43.5, 168.5, 80.0, 290.0, 138.0, 229.0];

/// 单臂关节下限（度）
const ARM_LOWER_DEG: [f64; 7] = [-168.5, -143.5, -168.5, -123.5, -290.0, -88.0, -229.0];

/// 夹爪行程上限（米）
const GRIPPER_TRAVEL_MAX_M: f64 = 0.025;

/// 18 维关节限位
///
/// 位姿向量的每个分量都必须保持在 `[lower, upper]` 区间内，
/// 这是积分循环每个 tick 结束后的不变量。
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointLimits {
    /// 下界（臂：弧度，夹爪：米）
    pub lower: [f64; POSE_DOF],
    /// 上界（臂：弧度，夹爪：米）
    pub upper: [f64; POSE_DOF],
}

impl JointLimits {
    /// 出厂限位
    pub fn yumi() -> Self {
        let mut lower = [0.0; POSE_DOF];
        let mut upper = [0.0; POSE_DOF];

        for i in 0..7 {
            let lo = ARM_LOWER_DEG[i].to_radians();
            let hi = ARM_UPPER_DEG[i].to_radians();
            // 同一组限位应用到双臂
            lower[i] = lo;
            lower[i + 7] = lo;
            upper[i] = hi;
            upper[i + 7] = hi;
        }
        for i in ARM_UPPER_DEG.len() * 2..POSE_DOF {
            lower[i] = 0.0;
            upper[i] = GRIPPER_TRAVEL_MAX_M;
        }

        Self { lower, upper }
    }

    /// 元素级饱和：把位姿向量夹入 `[lower, upper]`
    pub fn clamp(&self, pose: &mut [f64; POSE_DOF]) {
        for i in 0..POSE_DOF {
            pose[i] = pose[i].clamp(self.lower[i], self.upper[i]);
        }
    }

    /// 检查位姿向量是否全部在限位内
    pub fn contains(&self, pose: &[f64; POSE_DOF]) -> bool {
        pose.iter()
            .enumerate()
            .all(|(i, &p)| p >= self.lower[i] && p <= self.upper[i])
    }
}

impl Default for JointLimits {
    fn default() -> Self {
        Self::yumi()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::YumiJointState;

    #[test]
    fn test_limits_layout() {
        let limits = JointLimits::yumi();
        // 双臂共用同一组限位
        assert_eq!(limits.upper[0], 168.5_f64.to_radians());
        assert_eq!(limits.upper[7], limits.upper[0]);
        assert_eq!(limits.lower[3], (-123.5_f64).to_radians());
        assert_eq!(limits.lower[10], limits.lower[3]);
        // 夹爪四个槽位均为 [0, 0.025]
        for i in 14..18 {
            assert_eq!(limits.lower[i], 0.0);
            assert_eq!(limits.upper[i], 0.025);
        }
    }

    #[test]
    fn test_clamp_saturates_both_sides() {
        let limits = JointLimits::yumi();
        let mut pose = [0.0; POSE_DOF];
        pose[0] = 100.0;
        pose[1] = -100.0;
        pose[14] = 1.0;
        pose[16] = -1.0;

        limits.clamp(&mut pose);
        assert_eq!(pose[0], limits.upper[0]);
        assert_eq!(pose[1], limits.lower[1]);
        assert_eq!(pose[14], 0.025);
        assert_eq!(pose[16], 0.0);
        assert!(limits.contains(&pose));
    }

    #[test]
    fn test_seed_pose_within_limits() {
        let limits = JointLimits::yumi();
        let pose = YumiJointState::seeded().pose_vector();
        assert!(limits.contains(&pose));
    }

    #[test]
    fn test_clamp_is_identity_inside_limits() {
        let limits = JointLimits::yumi();
        let mut pose = YumiJointState::seeded().pose_vector();
        let before = pose;
        limits.clamp(&mut pose);
        assert_eq!(pose, before);
    }
}
