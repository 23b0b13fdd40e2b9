//! YuMi 关节状态运动学仿真器
//!
//! 以固定频率（默认 250 Hz）对外部速度指令做一阶显式欧拉积分，维护一份
//! 受互斥锁保护的关节状态，强制关节硬限位，并通过「暂存/触发」两段式
//! 协议模拟 SG 夹爪的异步命令接口。
//!
//! # 架构
//!
//! - [`Simulator`]: 共享状态核心。速度注入、夹爪服务和积分 tick 全部
//!   经由同一把 `parking_lot::Mutex` 串行化。
//! - [`SimRunner`]: 固定频率驱动线程。每个周期调用一次 `tick()`，
//!   随后在锁外发布关节状态报文与 EGM 通道健康报文。
//! - [`SimConfig`]: 仿真参数（更新频率、发布队列深度），支持 TOML 加载。
//!
//! # 快速开始
//!
//! ```
//! use std::sync::Arc;
//! use yumi_sim::{SimConfig, SimRunner, Simulator};
//!
//! let config = SimConfig::default();
//! let sim = Arc::new(Simulator::new(&config).unwrap());
//! let runner = SimRunner::spawn(sim.clone(), config).unwrap();
//!
//! // 异步路径：注入速度指令（[左 7, 右 7]，rad/s）
//! sim.ingest_velocity(&[0.0; 14]).unwrap();
//!
//! // 同步路径：SG 夹爪 stage/trigger
//! sim.stage_gripper_command("T_ROB_R", 5, 25.0).unwrap();
//! sim.trigger_gripper_routine();
//!
//! runner.join();
//! ```

pub mod config;
pub mod error;
pub mod gripper;
pub mod runner;
pub mod simulator;

pub use config::SimConfig;
pub use error::SimError;
pub use gripper::GripperCommandStage;
pub use runner::SimRunner;
pub use simulator::Simulator;
