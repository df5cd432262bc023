use std::io::IsTerminal;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::{error, info};

use crate::config::Config;
use crate::models::ChatRole;
use crate::presentation::render::render_unmatched;
use crate::presentation::{render_score_card, render_segments, unmatched_corrections, RenderOptions};
use crate::services::{ingest, CorrectionService};
use crate::utils::logging;
use crate::workflow::{EssayState, SubmissionOutcome};

const HELP: &str = "Commands: /new <file> load and correct another essay, /paste type a new essay, /history show the chat, /quit exit. Anything else is sent as a follow-up question.";

/// 应用主结构
pub struct App {
    corrector: CorrectionService,
    state: EssayState,
    render: RenderOptions,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        let corrector = CorrectionService::new(&config)?;
        let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();

        Ok(Self {
            corrector,
            state: EssayState::new(),
            render: RenderOptions {
                color,
                footnotes: true,
            },
        })
    }

    /// 运行应用主逻辑
    ///
    /// 先批改 `source` 指定的作文（未指定时从标准输入读取），再进入追问循环
    pub async fn run(mut self, source: Option<String>) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        match source {
            Some(location) => self.submit_from(&location).await,
            None => {
                let essay = read_essay(&mut lines).await?;
                self.submit(essay).await;
            }
        }

        println!("\n{}", HELP);

        while let Some(line) = lines.next_line().await? {
            let line = line.trim_end();
            match line.split_once(' ').map_or((line, ""), |(cmd, rest)| (cmd, rest.trim())) {
                ("/quit", _) | ("/exit", _) => break,
                ("/new", location) if !location.is_empty() => self.submit_from(location).await,
                ("/new", _) => println!("Usage: /new <file>"),
                ("/paste", _) => {
                    let essay = read_essay(&mut lines).await?;
                    self.submit(essay).await;
                }
                ("/history", _) => self.print_history(),
                _ => self.chat(line).await,
            }
        }

        info!("👋 程序结束");
        Ok(())
    }

    async fn submit_from(&mut self, location: &str) {
        match ingest::load_essay(location, self.corrector.llm()).await {
            Ok(essay) => self.submit(essay).await,
            Err(e) => {
                error!("❌ 读取作文失败: {}", e);
                println!("Error: {}", e);
            }
        }
    }

    async fn submit(&mut self, essay: String) {
        let ticket = self.state.begin_submission(essay);
        println!("Correcting...");

        let outcome = self.corrector.correct_essay(self.state.essay_text()).await;

        if self.state.complete_submission(ticket, outcome) == SubmissionOutcome::Applied {
            self.print_result();
        }
    }

    async fn chat(&mut self, message: &str) {
        let session = match self.state.begin_chat(message) {
            Ok(Some(session)) => session,
            Ok(None) => return,
            Err(e) => {
                println!("Error: {}", e);
                return;
            }
        };

        let reply = session.send(message).await;
        self.state.complete_chat(reply);

        if let Some(last) = self.state.chat_history().last() {
            println!("\nTutor: {}\n", last.text);
        }
    }

    fn print_result(&self) {
        if let Some(err) = self.state.error() {
            println!("Error: {}", err);
            return;
        }
        let Some(result) = self.state.result() else {
            return;
        };

        let segments = self.state.segments();
        let unmatched = unmatched_corrections(&segments, &result.corrections);
        logging::log_annotation_stats(result.corrections.len() - unmatched.len(), result.corrections.len());

        println!("\n== Feedback ==\n{}\n", result.summary);
        print!("{}", render_score_card(&result.scores, self.render.color));
        println!("\n== Corrected Essay ==\n{}", render_segments(&segments, &self.render));

        if result.corrections.is_empty() {
            println!("\nNo corrections needed. Great job!");
        } else if !unmatched.is_empty() {
            println!("\n== Other Issues ==\n{}", render_unmatched(&unmatched));
        }

        if let Some(greeting) = self.state.chat_history().first() {
            println!("\nTutor: {}", greeting.text);
        }
    }

    fn print_history(&self) {
        for message in self.state.chat_history() {
            let speaker = match message.role {
                ChatRole::User => "You",
                ChatRole::Model => "Tutor",
            };
            println!("{}: {}", speaker, message.text);
        }
    }
}

/// 读取一篇作文，以单独一行 "." 或输入结束为止
async fn read_essay<R>(lines: &mut Lines<R>) -> Result<String>
where
    R: AsyncBufRead + Unpin,
{
    println!("Paste your essay, then finish with a line containing only \".\":");

    let mut essay = Vec::new();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "." {
            break;
        }
        essay.push(line);
    }
    Ok(essay.join("\n"))
}
