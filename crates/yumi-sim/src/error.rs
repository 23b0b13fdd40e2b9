//! 仿真层错误类型定义

use thiserror::Error;
use yumi_state::{CommandError, StateError};

/// 仿真层错误类型
#[derive(Error, Debug)]
pub enum SimError {
    /// 状态层错误（向量长度违约）
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// SG 命令解析错误
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    /// 配置无效或配置文件加载失败
    #[error("Config error: {0}")]
    Config(String),

    /// tick 线程启动或运行错误
    #[error("Tick thread error: {0}")]
    Thread(String),
}
