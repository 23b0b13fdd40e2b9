//! 仿真器核心
//!
//! 持有一份受互斥锁保护的共享状态（关节状态 + 夹爪命令暂存区），
//! 服务三个独立的执行上下文：
//!
//! - **周期驱动**：固定频率调用 [`Simulator::tick`]，做一阶欧拉积分；
//! - **异步注入**：速度指令随时到达，经 [`Simulator::ingest_velocity`] 写入，
//!   与 tick 没有任何相位关系；
//! - **同步服务**：SG 夹爪的 stage/trigger 请求-响应调用。
//!
//! 三条路径的每次读-改-写都在同一把 `parking_lot::Mutex` 下完成，
//! 锁覆盖完整的计算-写回序列，位姿读取与速度更新之间不会出现撕裂。

use crate::config::SimConfig;
use crate::error::SimError;
use crate::gripper::GripperCommandStage;
use parking_lot::Mutex;
use tracing::{debug, warn};
use yumi_state::{
    ArmTask, CommandError, JointLimits, SetSgCommand, SgCommand, SgResponse, StateError,
    YumiJointState, ARM_DOF, POSE_DOF,
};

/// 互斥锁保护的共享状态
#[derive(Debug)]
struct SimCore {
    joints: YumiJointState,
    gripper: GripperCommandStage,
}

/// 关节状态运动学仿真器
///
/// 积分步骤（每个 tick 一个独占区间）：
///
/// 1. 读取当前位姿向量与速度向量；
/// 2. 全 18 维做显式欧拉步 `candidate = pose + rate * dt`；
/// 3. 用一阶趋近覆盖 4 个夹爪槽位：`g + (active - g) * dt`
///    （dt 直接作为无量纲收敛增益——与参考行为保持一致，见 DESIGN.md）；
/// 4. 元素级夹入 `[lower, upper]`；
/// 5. 写回。
///
/// 保证：无论输入速度多大，tick 之后位姿向量始终在限位内。
#[derive(Debug)]
pub struct Simulator {
    core: Mutex<SimCore>,
    limits: JointLimits,
    dt: f64,
}

impl Simulator {
    /// 创建仿真器
    ///
    /// 关节状态取固定种子位姿，夹爪暂存区全零。
    ///
    /// # Errors
    ///
    /// 配置校验失败时返回 [`SimError::Config`]。
    pub fn new(config: &SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            core: Mutex::new(SimCore {
                joints: YumiJointState::seeded(),
                gripper: GripperCommandStage::new(),
            }),
            limits: JointLimits::yumi(),
            dt: config.dt(),
        })
    }

    /// 积分步长（秒）
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// 注入一条外部速度指令
    ///
    /// 外部控制器按 `[左臂 7, 右臂 7]`（rad/s）下发；这里重排为内部的
    /// `[右臂 7, 左臂 7]` 约定，补 4 个零（夹爪不受速度直接驱动），
    /// 在锁内一次性替换全部速度字段。
    ///
    /// # Errors
    ///
    /// 输入长度不是 14 时返回错误，状态不变。
    pub fn ingest_velocity(&self, vel: &[f64]) -> Result<(), SimError> {
        if vel.len() != ARM_DOF {
            return Err(StateError::InvalidLength {
                expected: ARM_DOF,
                actual: vel.len(),
            }
            .into());
        }

        let mut internal = [0.0; POSE_DOF];
        internal[..7].copy_from_slice(&vel[7..14]);
        internal[7..14].copy_from_slice(&vel[..7]);
        // [14, 18) 保持 0：夹爪速度由 tick 内的趋近项决定

        let mut core = self.core.lock();
        core.joints
            .apply_rate(&internal)
            .expect("internal rate vector is POSE_DOF long");
        Ok(())
    }

    /// 执行一个积分 tick，返回写回后的（位姿, 速度）快照
    ///
    /// 整个读-算-写序列在一个独占区间内完成；向量维度固定（18），
    /// 除等锁外不阻塞，报文发布等慢速协作都发生在锁外。
    pub fn tick(&self) -> ([f64; POSE_DOF], [f64; POSE_DOF]) {
        let mut core = self.core.lock();

        let pose = core.joints.pose_vector();
        let rate = core.joints.rate_vector();

        // 1. 显式欧拉步（全 18 维）
        let mut candidate = [0.0; POSE_DOF];
        for i in 0..POSE_DOF {
            candidate[i] = pose[i] + rate[i] * self.dt;
        }

        // 2. 夹爪槽位改为向生效目标的一阶趋近（主 + 随动共用同侧目标）
        let active = core.gripper.active();
        for (slot, side) in [(14, 0), (15, 0), (16, 1), (17, 1)] {
            candidate[slot] = pose[slot] + (active[side] - pose[slot]) * self.dt;
        }

        // 3. 关节硬限位
        self.limits.clamp(&mut candidate);

        // 4. 写回
        core.joints
            .apply_pose(&candidate)
            .expect("candidate pose is POSE_DOF long");

        (candidate, core.joints.rate_vector())
    }

    /// 暂存一条 SG 夹爪命令
    ///
    /// 任务名和命令码都解析成功后才写暂存区；任何一步失败都不产生
    /// 副作用。夹爪在下一次 [`trigger_gripper_routine`](Self::trigger_gripper_routine)
    /// 之前不会移动。
    ///
    /// # Errors
    ///
    /// [`CommandError::InvalidTask`] / [`CommandError::InvalidCommand`]。
    pub fn stage_gripper_command(
        &self,
        task: &str,
        command: u8,
        target_mm: f64,
    ) -> Result<(), CommandError> {
        let task = ArmTask::from_task_name(task)?;
        let command = SgCommand::from_wire(command, target_mm)?;

        let target_m = command.target_m();
        let mut core = self.core.lock();
        core.gripper.stage(task, target_m);
        debug!(
            "SG command staged: task={}, target={:.4} m",
            task.task_name(),
            target_m
        );
        Ok(())
    }

    /// 触发夹爪例程：把双侧暂存目标整体拷贝为生效目标
    ///
    /// 无条件成功；夹爪从下一个 tick 起向生效目标收敛。
    pub fn trigger_gripper_routine(&self) {
        let mut core = self.core.lock();
        core.gripper.trigger();
        debug!("SG routine triggered: active={:?}", core.gripper.active());
    }

    /// 在一个独占区间内读取一致的（位姿, 速度）快照
    pub fn snapshot(&self) -> ([f64; POSE_DOF], [f64; POSE_DOF]) {
        let core = self.core.lock();
        (core.joints.pose_vector(), core.joints.rate_vector())
    }

    /// 夹爪暂存区快照（测试与诊断用）
    pub fn gripper_stage(&self) -> GripperCommandStage {
        self.core.lock().gripper
    }

    /// `set_sg_command` 服务处理器
    ///
    /// 错误一律映射为失败结果码返回给调用方，绝不向 tick 循环传播。
    pub fn handle_set_sg_command(&self, request: &SetSgCommand) -> SgResponse {
        match self.stage_gripper_command(&request.task, request.command, request.target_position_mm)
        {
            Ok(()) => SgResponse::success(),
            Err(e) => {
                warn!("Rejected SG command: {}", e);
                SgResponse::failure()
            },
        }
    }

    /// `run_sg_routine` 服务处理器（恒成功）
    pub fn handle_run_sg_routine(&self) -> SgResponse {
        self.trigger_gripper_routine();
        SgResponse::success()
    }
}
