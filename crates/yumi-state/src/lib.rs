//! YuMi 仿真器数据模型层
//!
//! 提供双臂关节状态容器、关节限位、SG 夹爪命令编解码和周期性上报类型。
//! 本 crate 不含任何行为逻辑（积分、锁、线程），只负责数据布局与转换：
//!
//! - **状态层** (`state`): 14 关节 + 双夹爪的位姿/速度容器，18 维向量转换
//! - **限位层** (`limits`): IRB 14000 关节限位（弧度）与夹爪行程限位（米）
//! - **命令层** (`command`): RWS SG 服务的任务/命令编码（`T_ROB_R`、码值 5/6/7）
//! - **上报层** (`report`): 每 tick 发布的关节状态与 EGM 通道健康报文
//!
//! # 向量布局
//!
//! 所有 18 维向量使用固定顺序：右臂 7 关节、左臂 7 关节、右夹爪 2 关节
//! （主 + 随动）、左夹爪 2 关节。详见 [`state::YumiJointState`]。

pub mod command;
pub mod limits;
pub mod report;
pub mod state;

pub use command::{
    ArmTask, CommandError, SetSgCommand, SgCommand, SgCommandCode, SgResponse, SgResultCode,
    TASK_LEFT, TASK_RIGHT,
};
pub use limits::JointLimits;
pub use report::{EgmChannelState, EgmStateReport, JointStateReport, JOINT_NAMES};
pub use state::{StateError, YumiJointState, ARM_DOF, POSE_DOF};
