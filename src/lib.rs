//! # quizgen
//!
//! 文档生成测验的命令行客户端：上传文档、设置题型数量和难度、展示生成的题目
//!
//! ## 架构设计
//!
//! 文档解析与出题都由外部后端完成，本 crate 只负责两个 HTTP 调用前后的校验、状态和展示。
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 持有 HTTP 连接，只暴露能力
//! - `QuizBackend` - 上传 / 生成两个接口
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 纯函数能力，不发起网络请求
//! - `normalizer` - 把响应归一化为题目列表
//! - `renderer` - 渲染题目、标记正确答案
//! - `clipboard` - 复制题目
//!
//! ### ③ 组件层（Workflow）
//! - `workflow/` - 单个组件的局部状态
//! - `UploadWidget` - 选择、校验、上传
//! - `SettingsPanel` - 题型数量和难度
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/session` - 组合各组件，控制"先上传后生成"
//! - `orchestrator/interactive` - 交互命令
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{HttpQuizClient, QuizBackend};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Difficulty, GenerationSettings, QuizQuestion, UploadedFile};
pub use orchestrator::{Phase, Session};
pub use workflow::{SettingsPanel, UploadWidget};
