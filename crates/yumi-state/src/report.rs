//! 周期性上报类型
//!
//! 每个 tick 向外发布两条报文：18 关节的状态报文（名称、位姿、速度、
//! 时间戳、单调递增序号）和 EGM 通道健康报文（两条通道，恒为 active，
//! 作为真实链路健康遥测的静态占位）。

use crate::state::POSE_DOF;

/// 18 个关节的发布顺序与 URDF 名称
///
/// 顺序与位姿向量布局一致：右臂 7、左臂 7、右夹爪（主 + 随动）、
/// 左夹爪（主 + 随动）。
pub const JOINT_NAMES: [&str; POSE_DOF] = [
    "yumi_robr_joint_1",
    "yumi_robr_joint_2",
    "yumi_robr_joint_3",
    "yumi_robr_joint_4",
    "yumi_robr_joint_5",
    "yumi_robr_joint_6",
    "yumi_robr_joint_7",
    "yumi_robl_joint_1",
    "yumi_robl_joint_2",
    "yumi_robl_joint_3",
    "yumi_robl_joint_4",
    "yumi_robl_joint_5",
    "yumi_robl_joint_6",
    "yumi_robl_joint_7",
    "gripper_r_joint",
    "gripper_r_joint_m",
    "gripper_l_joint",
    "gripper_l_joint_m",
];

/// 关节状态报文
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct JointStateReport {
    /// 单调递增序号，从 1 开始，无跳号无重复
    pub seq: u64,
    /// 发布时刻（UNIX 时间，微秒）
    pub timestamp_us: u64,
    /// 关节名（固定为 [`JOINT_NAMES`]）
    pub name: [&'static str; POSE_DOF],
    /// 位姿向量（臂：弧度，夹爪：米）
    pub position: [f64; POSE_DOF],
    /// 速度向量（臂：rad/s，夹爪：m/s）
    pub velocity: [f64; POSE_DOF],
}

impl JointStateReport {
    /// 组装一条报文
    pub fn new(
        seq: u64,
        timestamp_us: u64,
        position: [f64; POSE_DOF],
        velocity: [f64; POSE_DOF],
    ) -> Self {
        Self {
            seq,
            timestamp_us,
            name: JOINT_NAMES,
            position,
            velocity,
        }
    }
}

/// 单条 EGM 通道状态
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EgmChannelState {
    /// 通道名
    pub name: &'static str,
    /// 链路是否活跃
    pub active: bool,
}

/// EGM 通道健康报文
///
/// 两条通道恒为 active：仿真器没有真实链路可监控，报文只保证下游
/// 订阅者能看到与真实控制器一致的形状。
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EgmStateReport {
    /// 双臂各一条通道
    pub channels: [EgmChannelState; 2],
}

impl EgmStateReport {
    /// 恒为 active 的静态报文
    pub fn all_active() -> Self {
        Self {
            channels: [
                EgmChannelState {
                    name: "channel_1",
                    active: true,
                },
                EgmChannelState {
                    name: "channel_2",
                    active: true,
                },
            ],
        }
    }
}

impl Default for EgmStateReport {
    fn default() -> Self {
        Self::all_active()
    }
}
