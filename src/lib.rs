//! # Essay Corrector
//!
//! 一个借助大模型批改英语作文的 Rust 应用程序：
//! 把作文交给 AI 批改，把返回的修改建议叠加标注在原文上，并支持针对批改结果的追问。
//!
//! ## 架构设计
//!
//! ### ① 核心算法（Annotator）
//! - `annotator` - 把原文与修改建议对齐，生成原文 / 高亮交替的片段，纯函数
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程
//! - `LlmService` - 调用兼容 OpenAI 的大模型接口
//! - `CorrectionService` - 批改作文，返回结果和追问会话
//! - `ChatSession` - 追问会话，由批改操作创建、调用方显式持有
//! - `ingest` - 读取文本文件，或让 AI 识别图片中的作文
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 界面状态：加载标记、请求编号、聊天记录
//!
//! ### ④ 展示层（Presentation）
//! - `presentation/` - 分类样式、得分卡、标注文本的终端渲染
//!
//! ### ⑤ 编排层（App）
//! - `app` - 命令行交互循环，串联以上各层
//!
//! ## 模块结构

pub mod annotator;
pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod presentation;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use annotator::annotate;
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Category, ChatMessage, ChatRole, Correction, CorrectionResponse, Scores, Segment};
pub use services::{ChatSession, CorrectionService, LlmService};
pub use workflow::{EssayState, RequestTicket, SubmissionOutcome};
