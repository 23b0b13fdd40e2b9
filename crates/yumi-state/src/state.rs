//! 双臂关节状态容器
//!
//! `YumiJointState` 持有双臂 14 个关节与两个夹爪（各 2 关节）的位姿和速度。
//! 状态以 `[f64; N]` 数组存储，向量化接口负责在 18 维全量向量与分字段
//! 表示之间转换。
//!
//! # 向量布局（固定偏移）
//!
//! | 区间      | 内容               | 单位  |
//! |-----------|--------------------|-------|
//! | `[0, 14)` | 右臂 7 + 左臂 7    | rad   |
//! | `[14, 16)`| 右夹爪（主 + 随动）| m     |
//! | `[16, 18)`| 左夹爪（主 + 随动）| m     |

use thiserror::Error;

/// 双臂关节自由度（右 7 + 左 7）
pub const ARM_DOF: usize = 14;

/// 全量位姿向量维度（臂 14 + 右夹爪 2 + 左夹爪 2）
pub const POSE_DOF: usize = 18;

/// 启动时的固定种子位姿（右臂 7 关节，弧度）
const SEED_ARM_RIGHT: [f64; 7] = [0.0, -2.270, -2.356, 0.524, 0.0, 0.670, 0.0];

/// 启动时的固定种子位姿（左臂 7 关节，弧度）
const SEED_ARM_LEFT: [f64; 7] = [0.0, -2.270, 2.356, 0.524, 0.0, 0.670, 0.0];

/// 状态层错误类型
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// 向量长度不符合约定
    ///
    /// 长度错误属于调用方契约违规，必须显式拒绝，不允许静默截断。
    #[error("Invalid vector length: expected {expected}, actual {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// 双臂关节状态
///
/// 一个进程生命周期内只存在一个实例：启动时由 [`YumiJointState::seeded`]
/// 创建，此后每个 tick 和每次速度注入都会原地修改。
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YumiJointState {
    /// 臂关节位置（弧度）[右 1-7, 左 1-7]
    pub arm_position: [f64; ARM_DOF],
    /// 臂关节速度（rad/s）[右 1-7, 左 1-7]
    pub arm_velocity: [f64; ARM_DOF],
    /// 右夹爪位置（米）[主, 随动]
    pub gripper_right_position: [f64; 2],
    /// 左夹爪位置（米）[主, 随动]
    pub gripper_left_position: [f64; 2],
    /// 右夹爪速度（m/s）[主, 随动]
    pub gripper_right_velocity: [f64; 2],
    /// 左夹爪速度（m/s）[主, 随动]
    pub gripper_left_velocity: [f64; 2],
}

impl YumiJointState {
    /// 创建种子状态
    ///
    /// 显式工厂：每次调用返回全新实例（臂关节取固定种子位姿，
    /// 其余字段为零），实例之间不共享任何数据。
    pub fn seeded() -> Self {
        let mut arm_position = [0.0; ARM_DOF];
        arm_position[..7].copy_from_slice(&SEED_ARM_RIGHT);
        arm_position[7..].copy_from_slice(&SEED_ARM_LEFT);

        Self {
            arm_position,
            arm_velocity: [0.0; ARM_DOF],
            gripper_right_position: [0.0; 2],
            gripper_left_position: [0.0; 2],
            gripper_right_velocity: [0.0; 2],
            gripper_left_velocity: [0.0; 2],
        }
    }

    /// 全量位姿向量（18 维，按固定布局拼接）
    pub fn pose_vector(&self) -> [f64; POSE_DOF] {
        let mut pose = [0.0; POSE_DOF];
        pose[..ARM_DOF].copy_from_slice(&self.arm_position);
        pose[14..16].copy_from_slice(&self.gripper_right_position);
        pose[16..18].copy_from_slice(&self.gripper_left_position);
        pose
    }

    /// 全量速度向量（18 维，布局与 [`pose_vector`](Self::pose_vector) 一致）
    pub fn rate_vector(&self) -> [f64; POSE_DOF] {
        let mut rate = [0.0; POSE_DOF];
        rate[..ARM_DOF].copy_from_slice(&self.arm_velocity);
        rate[14..16].copy_from_slice(&self.gripper_right_velocity);
        rate[16..18].copy_from_slice(&self.gripper_left_velocity);
        rate
    }

    /// 按固定偏移把 18 维位姿向量拆回各字段
    ///
    /// # Errors
    ///
    /// 输入长度不是 18 时返回 [`StateError::InvalidLength`]，状态不变。
    pub fn apply_pose(&mut self, pose: &[f64]) -> Result<(), StateError> {
        if pose.len() != POSE_DOF {
            return Err(StateError::InvalidLength {
                expected: POSE_DOF,
                actual: pose.len(),
            });
        }
        self.arm_position.copy_from_slice(&pose[..ARM_DOF]);
        self.gripper_right_position.copy_from_slice(&pose[14..16]);
        self.gripper_left_position.copy_from_slice(&pose[16..18]);
        Ok(())
    }

    /// 按固定偏移把 18 维速度向量拆回各字段
    ///
    /// # Errors
    ///
    /// 输入长度不是 18 时返回 [`StateError::InvalidLength`]，状态不变。
    pub fn apply_rate(&mut self, rate: &[f64]) -> Result<(), StateError> {
        if rate.len() != POSE_DOF {
            return Err(StateError::InvalidLength {
                expected: POSE_DOF,
                actual: rate.len(),
            });
        }
        self.arm_velocity.copy_from_slice(&rate[..ARM_DOF]);
        self.gripper_right_velocity.copy_from_slice(&rate[14..16]);
        self.gripper_left_velocity.copy_from_slice(&rate[16..18]);
        Ok(())
    }
}

impl Default for YumiJointState {
    fn default() -> Self {
        Self::seeded()
    }
}
