//! YuMi 仿真守护进程主入口
//!
//! 启动固定频率积分线程，在主线程消费每个 tick 的关节状态报文：
//! 默认按 1 Hz 打印摘要日志，`--json` 时逐条输出 JSON 行（供下游
//! 桥接进程订阅）。速度注入与 SG 夹爪服务以 `Arc<Simulator>` 上的
//! 普通方法调用暴露，真实的话题/服务传输不在本进程范围内。

use clap::Parser;
use std::process;
use std::sync::Arc;
use tracing::{error, info};
use yumi_sim::{SimConfig, SimRunner, Simulator};

/// YuMi 双臂关节状态仿真器
///
/// 以固定频率积分速度指令，发布关节状态与 EGM 通道健康报文。
#[derive(Parser, Debug)]
#[command(name = "yumi-simd")]
#[command(about = "YuMi joint-state simulator daemon", long_about = None)]
struct Args {
    /// 积分频率（Hz）
    ///
    /// 覆盖配置文件中的 update_rate_hz。默认: 250
    #[arg(long)]
    rate: Option<f64>,

    /// TOML 配置文件路径（可选）
    #[arg(long)]
    config: Option<String>,

    /// 运行的 tick 数（默认一直运行到 Ctrl+C）
    #[arg(long)]
    ticks: Option<u64>,

    /// 逐条输出 JSON 行而不是摘要日志
    #[arg(long)]
    json: bool,
}

fn main() {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("yumi_simd=info".parse().unwrap())
                .add_directive("yumi_sim=info".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    // 配置：文件 → CLI 覆盖
    let mut config = match &args.config {
        Some(path) => match SimConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load config: {}", e);
                process::exit(1);
            },
        },
        None => SimConfig::default(),
    };
    if let Some(rate) = args.rate {
        config.update_rate_hz = rate;
    }
    if args.ticks.is_some() {
        config.max_ticks = args.ticks;
    }
    // JSON 输出时消费端必须跟得上，放宽队列深度
    if args.json && config.channel_capacity < 64 {
        config.channel_capacity = 64;
    }

    let sim = match Simulator::new(&config) {
        Ok(sim) => Arc::new(sim),
        Err(e) => {
            error!("Failed to create simulator: {}", e);
            process::exit(1);
        },
    };

    let runner = match SimRunner::spawn(sim.clone(), config.clone()) {
        Ok(runner) => Arc::new(runner),
        Err(e) => {
            error!("Failed to start tick loop: {}", e);
            process::exit(1);
        },
    };

    // Ctrl+C 优雅退出：只翻转运行标志，join 在 main 尾部完成
    {
        let runner = runner.clone();
        ctrlc::set_handler(move || {
            eprintln!("\nReceived interrupt signal. Shutting down...");
            runner.stop();
        })
        .expect("Failed to set signal handler");
    }

    info!(
        "yumi-simd started: {} Hz, queue depth {}",
        config.update_rate_hz, config.channel_capacity
    );

    // 主线程：消费状态报文直到 tick 线程退出
    let reports = runner.state_reports();
    let summary_every = config.update_rate_hz.max(1.0) as u64;
    while let Ok(report) = reports.recv() {
        if args.json {
            match serde_json::to_string(&report) {
                Ok(line) => println!("{}", line),
                Err(e) => error!("Failed to serialize report: {}", e),
            }
        } else if report.seq % summary_every == 0 {
            info!(
                "seq={} t={}us robr_j1={:.4} robl_j1={:.4} grip_r={:.4} grip_l={:.4}",
                report.seq,
                report.timestamp_us,
                report.position[0],
                report.position[7],
                report.position[14],
                report.position[16],
            );
        }
    }

    info!("yumi-simd stopped");
}
