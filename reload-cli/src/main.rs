//! Reload CLI - コマンドラインインターフェース
//!
//! リロード型スクリプトランタイム向けデバッグブリッジ reload のREPLインターフェース。
//! トランスポートの代わりに手入力で通知を送り、イベントキューをポーリングできます。

use anyhow::Result;
use clap::Parser;
use reload_core::parse::{parse_location, parse_timeout};
use reload_core::{
    BridgeConfig, DebugEvent, EventSet, Polled, RequestRegistry, Session, StepDepth, ThreadState,
    REPORT_BREAKPOINT,
};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Reload - live-reload script debug bridge
#[derive(Parser)]
#[command(name = "reload-dbg")]
#[command(version = "0.1.0")]
#[command(about = "Debug bridge between a live-reload script runtime and a pull-based debugger", long_about = None)]
struct Cli {
    /// Workspace root used to normalize script paths
    #[arg(short, long, default_value = ".")]
    root: String,

    /// Poll timeout in milliseconds for `remove` without an argument (<= 0 waits forever)
    #[arg(short, long, default_value_t = 1000, allow_negative_numbers = true)]
    timeout: i64,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    log: String,

    /// Name of the debugged VM
    #[arg(long, default_value = "reload")]
    vm_name: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log);

    println!("Reload - live-reload debug bridge");
    println!("Version 0.1.0");
    println!();

    let config = BridgeConfig::new(&cli.root)
        .with_poll_timeout(cli.timeout)
        .with_vm_name(cli.vm_name);
    let session = Session::new(config)?;
    println!("Workspace root: {}", cli.root);
    println!("Poll timeout: {}ms", session.config().poll_timeout_ms);
    println!();

    run_repl(&session)?;

    Ok(())
}

/// ログ出力を初期化する
fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// REPLループを実行する
fn run_repl(session: &Session) -> Result<()> {
    println!("Type 'help' for available commands, 'quit' to exit.");
    println!();

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline("(reload) ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                rl.add_history_entry(line)?;

                match handle_command(session, line) {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

/// コマンドを処理する。終了する場合は false を返す
fn handle_command(session: &Session, line: &str) -> Result<bool> {
    let (cmd, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    debug!("repl command '{}' args '{}'", cmd, rest);

    match cmd {
        "help" | "h" | "?" => print_help(),
        "quit" | "q" | "exit" => {
            println!("Goodbye!");
            return Ok(false);
        }
        "send" => handle_send(session, rest)?,
        "report" => handle_report(session, rest)?,
        "break" | "b" => handle_break(session, rest)?,
        "step" | "s" => handle_step(session, rest)?,
        "delete" | "d" => {
            session.requests().delete(parse_id(rest)?)?;
            println!("Deleted request {}", rest);
        }
        "enable" => {
            session.requests().set_enabled(parse_id(rest)?, true)?;
            println!("Enabled request {}", rest);
        }
        "disable" => {
            session.requests().set_enabled(parse_id(rest)?, false)?;
            println!("Disabled request {}", rest);
        }
        "requests" | "r" => print_requests(session),
        "remove" | "poll" => handle_remove(session, rest)?,
        "resume" | "continue" | "c" => {
            session.resume();
            println!("Resumed");
        }
        "status" => print_status(session),
        _ => {
            println!("Unknown command: {}", line);
            println!("Type 'help' for available commands.");
        }
    }

    Ok(true)
}

fn parse_id(arg: &str) -> Result<usize> {
    arg.parse()
        .map_err(|e| anyhow::anyhow!("Invalid request id '{}': {}", arg, e))
}

/// Sendコマンドを処理する（`send <command> [json]`）
fn handle_send(session: &Session, args: &str) -> Result<()> {
    let (command, payload) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
    if command.is_empty() {
        anyhow::bail!("Usage: send <command> [json]");
    }

    let payload = payload.trim();
    if payload.is_empty() {
        session.sender().received(command);
    } else {
        let value: Value = serde_json::from_str(payload)?;
        session.sender().received_with(command, value);
    }
    println!("Queued '{}'", command);
    Ok(())
}

/// Reportコマンドを処理する（`report <file:line> [step]`）
fn handle_report(session: &Session, args: &str) -> Result<()> {
    let mut parts = args.split_whitespace();
    let loc = parts
        .next()
        .ok_or_else(|| anyhow::anyhow!("Usage: report <file:line> [step]"))?;
    let (file, line) = parse_location(loc)?;
    let step = parts.next() == Some("step");

    session.sender().received_with(
        REPORT_BREAKPOINT,
        serde_json::json!({ "file": file, "line": line, "step": step }),
    );
    println!("Queued {} at {}:{} (step: {})", REPORT_BREAKPOINT, file, line, step);
    Ok(())
}

/// Breakコマンドを処理する
fn handle_break(session: &Session, args: &str) -> Result<()> {
    let (file, line) = parse_location(args)?;
    let id = session.set_breakpoint(&file, line);
    println!("Breakpoint {} set at {}:{}", id, file, line);
    Ok(())
}

/// Stepコマンドを処理する
fn handle_step(session: &Session, args: &str) -> Result<()> {
    let depth = match args {
        "" | "into" | "in" => StepDepth::Into,
        "over" | "next" => StepDepth::Over,
        "out" | "finish" => StepDepth::Out,
        other => anyhow::bail!("Unknown step kind: {}", other),
    };
    let id = session.step(depth)?;
    println!("Step request {} ({:?}) active", id, depth);
    Ok(())
}

/// Removeコマンドを処理する
fn handle_remove(session: &Session, args: &str) -> Result<()> {
    let polled = if args.is_empty() {
        session.poll()
    } else {
        session.queue().remove_timeout(parse_timeout(args)?)
    };

    match polled {
        Polled::Events(set) => print_event_set(&set),
        Polled::NoEvent => println!("No event (notification dropped)"),
        Polled::TimedOut => println!("Timed out"),
    }
    Ok(())
}

fn print_event_set(set: &EventSet) {
    if set.is_empty() {
        println!("Empty event set");
        return;
    }

    println!("Event set ({} events):", set.len());
    for (i, event) in set.iter().enumerate() {
        let what = match event {
            DebugEvent::Breakpoint(e) => format!("breakpoint {} hit", e.request.id),
            DebugEvent::Step(e) => {
                format!("step {} ({:?}) completed", e.request.id, e.request.depth)
            }
        };
        println!(
            "  {}. {} at {} [thread {}]",
            i + 1,
            what,
            event.location(),
            event.thread()
        );
    }
    if let Some(mode) = set.suspend_mode() {
        let kind = if mode.is_hard() { "hard" } else { "soft" };
        println!("Thread suspended ({:?}, {})", mode, kind);
    }
}

fn print_requests(session: &Session) {
    let breakpoints = session.requests().breakpoint_requests();
    let steps = session.requests().step_requests();
    let total = session.requests().count();

    if breakpoints.is_empty() && steps.is_empty() {
        println!("No active requests ({} registered)", total);
        return;
    }

    println!("Active requests ({} registered):", total);
    for bp in &breakpoints {
        println!("  {}. breakpoint at {}:{}", bp.id, bp.source, bp.line);
    }
    for step in &steps {
        println!("  {}. step {:?} on thread {}", step.id, step.depth, step.thread);
    }
}

fn print_status(session: &Session) {
    println!("VM: {}", session.vm().name());
    for thread in session.vm().all_threads() {
        let state = match thread.state() {
            ThreadState::Running => "running".to_string(),
            ThreadState::Suspended(mode) => format!("suspended ({:?})", mode),
        };
        println!("  thread {} '{}': {}", thread.tid(), thread.name(), state);
    }
}

fn print_help() {
    println!("Available commands:");
    println!();
    println!("  help              - Show this help message");
    println!("  quit/exit/q       - Exit the debugger");
    println!();
    println!("Runtime notifications:");
    println!("  send <cmd> [json] - Queue a raw runtime command");
    println!("  report <loc> [step] - Queue a report-breakpoint notification");
    println!();
    println!("Requests:");
    println!("  break <loc>       - Add a breakpoint request");
    println!("  step [into|over|out] - Start a step and resume");
    println!("  delete <id>       - Delete a request");
    println!("  enable <id>       - Enable a request");
    println!("  disable <id>      - Disable a request");
    println!("  requests          - List active requests");
    println!();
    println!("Event queue:");
    println!("  remove [ms]       - Poll the event queue");
    println!("  resume (c)        - Resume the thread");
    println!("  status            - Show thread state");
    println!();
    println!("Examples:");
    println!("  break src/a.js:10");
    println!("  report src/a.js:10");
    println!("  send report-breakpoint {{\"file\": \"src/b.js\", \"line\": 5, \"step\": true}}");
    println!("  remove 50");
}
