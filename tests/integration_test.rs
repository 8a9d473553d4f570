use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use render_mermaid::error::AppError;
use render_mermaid::services::{MemoryNotifier, LINE_ENDING};
use render_mermaid::{
    logger, App, AppResult, BatchCoordinator, Block, Config, JobDispatcher, RenderJob,
    RenderOptions, Renderer, ResolvedPaths, TemporaryWorkspace,
};

/// 记录每次调用读到的输入，输出文件名以 "broken" 开头时失败
#[derive(Default)]
struct RecordingRenderer {
    seen: Mutex<Vec<(PathBuf, String)>>,
}

#[async_trait]
impl Renderer for RecordingRenderer {
    async fn render(&self, input: &Path, output: &Path, options: &RenderOptions) -> AppResult<()> {
        let definition =
            std::fs::read_to_string(input).map_err(|e| AppError::file_read_failed(input, e))?;
        self.seen
            .lock()
            .unwrap()
            .push((input.to_path_buf(), definition.clone()));

        let name = output.file_name().unwrap().to_string_lossy();
        if name.starts_with("broken") {
            return Err(AppError::mermaid_failed("Syntax error in graph"));
        }
        std::fs::write(output, format!("<!-- {} -->\n{}", options.theme, definition))
            .map_err(|e| AppError::file_write_failed(output, e))
    }
}

fn write_document(dir: &Path, lines: &[&str]) -> PathBuf {
    let path = dir.join("guide.md");
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}

#[tokio::test]
async fn test_document_pipeline_with_fake_renderer() {
    logger::init(true);

    let dir = tempfile::tempdir().unwrap();
    let document_path = write_document(
        dir.path(),
        &[
            "# Guide",
            "```mermaid",
            "graph TD",
            "  A-->B",
            "```",
            "Some text.",
            "```mermaid flow.svg",
            "sequenceDiagram",
            "  Alice->>Bob: Hi",
            "```",
            "```mermaid broken.png",
            "graph ???",
            "```",
            "```mermaid",
            "unterminated",
        ],
    );

    let renderer = Arc::new(RecordingRenderer::default());
    let notifier = Arc::new(MemoryNotifier::new());
    let app = App::with_collaborators(Config::default(), renderer.clone(), notifier.clone());

    let summary = app.run(&document_path).await.unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failures, vec!["[图表 #3] Syntax error in graph".to_string()]);

    let default_output = dir.path().join("guide_mrmd_1.png");
    let requested_output = dir.path().join("flow.svg");
    assert!(default_output.exists());
    assert!(requested_output.exists());
    assert!(!dir.path().join("broken.png").exists());

    // 输入文件内容与代码块内部的行完全一致
    let seen = renderer.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 3);
    let mut bodies: Vec<String> = seen.iter().map(|(_, body)| body.clone()).collect();
    bodies.sort();
    let mut expected = vec![
        ["graph TD", "  A-->B"].join(LINE_ENDING),
        ["sequenceDiagram", "  Alice->>Bob: Hi"].join(LINE_ENDING),
        "graph ???".to_string(),
    ];
    expected.sort();
    assert_eq!(bodies, expected);

    // 输入文件名固定，所有临时文件和临时目录都已删除
    let mut input_names: Vec<String> = seen
        .iter()
        .map(|(path, _)| path.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    input_names.sort();
    assert_eq!(
        input_names,
        vec!["guide_input_1.md", "guide_input_2.md", "guide_input_3.md"]
    );
    for (input, _) in &seen {
        assert!(!input.exists());
        assert!(!input.parent().unwrap().exists());
    }

    let mut messages: Vec<String> = notifier
        .notifications()
        .iter()
        .filter(|n| !n.is_error())
        .map(|n| n.message().to_string())
        .collect();
    messages.sort();
    assert_eq!(
        messages,
        vec![
            format!("{} was successfully generated", requested_output.display()),
            format!("{} was successfully generated", default_output.display()),
        ]
    );
    // 错误通知就是渲染器给出的原文
    assert_eq!(notifier.errors(), vec!["Syntax error in graph".to_string()]);
}

#[tokio::test]
async fn test_document_without_diagrams() {
    let dir = tempfile::tempdir().unwrap();
    let document_path = write_document(dir.path(), &["# Nothing here", "```rust", "fn main() {}", "```"]);

    let renderer = Arc::new(RecordingRenderer::default());
    let notifier = Arc::new(MemoryNotifier::new());
    let app = App::with_collaborators(Config::default(), renderer.clone(), notifier.clone());

    let summary = app.run(&document_path).await.unwrap();

    assert_eq!(summary.total, 0);
    assert!(renderer.seen.lock().unwrap().is_empty());
    assert!(notifier.notifications().is_empty());
}

#[tokio::test]
async fn test_missing_document_is_an_error() {
    let app = App::with_collaborators(
        Config::default(),
        Arc::new(RecordingRenderer::default()),
        Arc::new(MemoryNotifier::new()),
    );
    assert!(app.run(Path::new("/no/such/guide.md")).await.is_err());
}

#[tokio::test]
async fn test_invalid_extension_differs_only_in_outcome() {
    let out_dir = tempfile::tempdir().unwrap();
    let workspace = TemporaryWorkspace::create().unwrap();
    let workspace_path = workspace.path().to_path_buf();

    let job = |index: usize, name: &str| {
        RenderJob::new(
            Block {
                index,
                start_line: 0,
                end_line: 2,
                body: "A-->B".to_string(),
                requested_output: Some(name.to_string()),
            },
            ResolvedPaths {
                input_path: workspace_path.join(format!("guide_input_{}.md", index)),
                output_path: out_dir.path().join(name),
            },
        )
    };

    let renderer = Arc::new(RecordingRenderer::default());
    let notifier = Arc::new(MemoryNotifier::new());
    let coordinator = BatchCoordinator::new(
        JobDispatcher::new(renderer.clone(), RenderOptions::default()),
        notifier.clone(),
        2,
    );

    let summary = coordinator
        .run_batch(vec![job(1, "diagram.png"), job(2, "diagram.txt")], workspace)
        .await;

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 1);
    // 只有 .png 的任务调用了渲染器
    assert_eq!(renderer.seen.lock().unwrap().len(), 1);
    assert!(out_dir.path().join("diagram.png").exists());
    assert!(!out_dir.path().join("diagram.txt").exists());
    assert_eq!(notifier.errors().len(), 1);
    assert!(!workspace_path.exists());
}

/// 需要本机安装 Chrome / Chromium 并能访问 mermaid 脚本：cargo test -- --ignored
#[tokio::test]
#[ignore]
async fn test_render_document_with_real_browser() {
    logger::init(true);

    let dir = tempfile::tempdir().unwrap();
    let document_path = write_document(
        dir.path(),
        &[
            "```mermaid",
            "graph LR",
            "  A-->B",
            "```",
            "```mermaid seq.svg",
            "sequenceDiagram",
            "  A->>B: hello",
            "```",
            "```mermaid flow.pdf",
            "graph TD; X-->Y",
            "```",
        ],
    );

    let config = Config {
        output_log_file: dir.path().join("render.log").to_string_lossy().to_string(),
        ..Config::default()
    };
    let app = App::initialize(config).expect("初始化失败");
    let summary = app.run(&document_path).await.expect("渲染失败");

    assert_eq!(summary.succeeded, 3, "所有图表都应该渲染成功");
    assert!(dir.path().join("guide_mrmd_1.png").exists());
    assert!(std::fs::read_to_string(dir.path().join("seq.svg"))
        .unwrap()
        .contains("<svg"));
    assert!(dir.path().join("flow.pdf").exists());
}
