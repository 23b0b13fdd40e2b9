//! SG 夹爪命令编解码
//!
//! 模拟 RWS `sm_addin` 的 SG（Smart Gripper）服务载荷：请求由 RAPID 任务名
//! （`T_ROB_R` / `T_ROB_L`）、数字命令码和目标行程（毫米）组成，响应是
//! 数字结果码加一个恒为空的消息字符串。
//!
//! 只模拟三种命令：移动到目标（5）、向内夹紧（6）、向外张开（7）。

use num_enum::{IntoPrimitive, TryFromPrimitive};
use thiserror::Error;

/// 右臂 RAPID 任务名
pub const TASK_RIGHT: &str = "T_ROB_R";

/// 左臂 RAPID 任务名
pub const TASK_LEFT: &str = "T_ROB_L";

/// 夹爪行程上限（米），`GripOut` 的目标值
const GRIP_OUT_TARGET_M: f64 = 0.025;

/// 命令层错误类型
///
/// 两种错误都对应服务响应里的失败结果码；出错路径不允许修改任何状态。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// 未识别的 RAPID 任务名
    #[error("Invalid task name: {0:?} (expected {TASK_RIGHT:?} or {TASK_LEFT:?})")]
    InvalidTask(String),

    /// 未识别的 SG 命令码
    #[error("Invalid SG command code: {0} (expected 5, 6 or 7)")]
    InvalidCommand(u8),
}

/// 臂侧任务索引
///
/// 每个夹爪侧逻辑独立；`index()` 给出夹爪数组下标。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArmTask {
    /// 右臂（索引 0）
    Right = 0,
    /// 左臂（索引 1）
    Left = 1,
}

impl ArmTask {
    /// 从 RAPID 任务名解析
    pub fn from_task_name(task: &str) -> Result<Self, CommandError> {
        match task {
            TASK_RIGHT => Ok(ArmTask::Right),
            TASK_LEFT => Ok(ArmTask::Left),
            other => Err(CommandError::InvalidTask(other.to_string())),
        }
    }

    /// 夹爪数组下标（右 0，左 1）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// RAPID 任务名
    pub const fn task_name(self) -> &'static str {
        match self {
            ArmTask::Right => TASK_RIGHT,
            ArmTask::Left => TASK_LEFT,
        }
    }
}

/// SG 命令的线上码值
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum SgCommandCode {
    /// 移动到指定行程
    MoveTo = 5,
    /// 向内夹紧（行程归零）
    GripIn = 6,
    /// 向外张开（行程最大）
    GripOut = 7,
}

/// 解析后的 SG 命令
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SgCommand {
    /// 移动到目标行程（毫米）
    MoveTo { target_mm: f64 },
    /// 向内夹紧
    GripIn,
    /// 向外张开
    GripOut,
}

impl SgCommand {
    /// 从线上码值和目标行程解析
    ///
    /// # Errors
    ///
    /// 码值不是 5/6/7 时返回 [`CommandError::InvalidCommand`]。
    pub fn from_wire(code: u8, target_mm: f64) -> Result<Self, CommandError> {
        let code =
            SgCommandCode::try_from(code).map_err(|e| CommandError::InvalidCommand(e.number))?;
        Ok(match code {
            SgCommandCode::MoveTo => SgCommand::MoveTo { target_mm },
            SgCommandCode::GripIn => SgCommand::GripIn,
            SgCommandCode::GripOut => SgCommand::GripOut,
        })
    }

    /// 解析为米制目标行程
    ///
    /// `MoveTo` 做 mm → m 换算；`GripIn`/`GripOut` 忽略请求里的目标值，
    /// 始终取 0 / 0.025 m。
    pub fn target_m(self) -> f64 {
        match self {
            SgCommand::MoveTo { target_mm } => target_mm / 1000.0,
            SgCommand::GripIn => 0.0,
            SgCommand::GripOut => GRIP_OUT_TARGET_M,
        }
    }
}

/// SG 服务结果码
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SgResultCode {
    /// 服务执行成功
    Success = 1,
    /// 服务执行失败
    Failure = 2,
}

/// `set_sg_command` 服务请求
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetSgCommand {
    /// RAPID 任务名（`T_ROB_R` / `T_ROB_L`）
    pub task: String,
    /// SG 命令码（5/6/7）
    pub command: u8,
    /// 目标行程（毫米，仅 `MoveTo` 使用）
    pub target_position_mm: f64,
}

/// SG 服务响应（`set_sg_command` 和 `run_sg_routine` 共用）
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SgResponse {
    /// 结果码
    pub result_code: SgResultCode,
    /// 附加消息（实际恒为空字符串）
    pub message: String,
}

impl SgResponse {
    /// 成功响应
    pub fn success() -> Self {
        Self {
            result_code: SgResultCode::Success,
            message: String::new(),
        }
    }

    /// 失败响应
    pub fn failure() -> Self {
        Self {
            result_code: SgResultCode::Failure,
            message: String::new(),
        }
    }
}
