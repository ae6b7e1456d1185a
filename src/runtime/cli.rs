//! Text front end: parses shell lines into commands and renders responses.
//!
//! All numeric validation happens here, so malformed input is rejected as
//! `InvalidInput` before it reaches the scheduler.

use std::fmt::Write as _;

use crate::core::{AuditEvent, Pid, ProcessSnapshot, SchedulerError, SchedulingPolicy, SystemStats};
use crate::runtime::api::{Command, Response};

/// Usage text printed by `help`.
pub const HELP: &str = "\
commands:
  create <name> <burst_ms> [priority]   admit a process (priority defaults to 0)
  terminate <pid>                       cancel a ready process
  list                                  show the ready queue and memory usage
  run <fcfs|priority|sjf>               execute every ready process
  stats                                 show system statistics
  history                               show recent lifecycle events
  help                                  show this text
  quit                                  leave the shell";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    /// A scheduler command.
    Command(Command),
    /// Show usage.
    Help,
    /// Show the audit log.
    History,
    /// Leave the shell.
    Quit,
}

/// Parse a shell line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ShellInput>, SchedulerError> {
    let mut tokens = line.split_whitespace();
    let Some(verb) = tokens.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = tokens.collect();

    let input = match verb.to_ascii_lowercase().as_str() {
        "create" | "new" => ShellInput::Command(parse_create(&args)?),
        "terminate" | "kill" => {
            expect_args("terminate", &args, 1, 1)?;
            ShellInput::Command(Command::Terminate {
                pid: parse_pid(args[0])?,
            })
        }
        "list" | "ls" | "ps" => {
            expect_args("list", &args, 0, 0)?;
            ShellInput::Command(Command::ListReady)
        }
        "run" => {
            expect_args("run", &args, 1, 1)?;
            ShellInput::Command(Command::Run {
                policy: args[0].parse::<SchedulingPolicy>()?,
            })
        }
        "stats" => {
            expect_args("stats", &args, 0, 0)?;
            ShellInput::Command(Command::Stats)
        }
        "history" => {
            expect_args("history", &args, 0, 0)?;
            ShellInput::History
        }
        "help" | "?" => ShellInput::Help,
        "quit" | "exit" => ShellInput::Quit,
        other => {
            return Err(SchedulerError::InvalidInput(format!(
                "unknown command '{other}', type 'help'"
            )))
        }
    };
    Ok(Some(input))
}

fn parse_create(args: &[&str]) -> Result<Command, SchedulerError> {
    expect_args("create", args, 2, 3)?;
    let burst_time = parse_burst(args[1])?;
    let priority = match args.get(2) {
        Some(raw) => raw
            .parse::<i32>()
            .map_err(|_| SchedulerError::InvalidInput(format!("priority '{raw}' is not an integer")))?,
        None => 0,
    };
    Ok(Command::Create {
        name: args[0].to_string(),
        burst_time,
        priority,
    })
}

fn parse_burst(raw: &str) -> Result<u32, SchedulerError> {
    match raw.parse::<u32>() {
        Ok(0) => Err(SchedulerError::InvalidInput(
            "burst time must be greater than 0".into(),
        )),
        Ok(burst) => Ok(burst),
        Err(_) => Err(SchedulerError::InvalidInput(format!(
            "burst time '{raw}' is not a positive integer"
        ))),
    }
}

fn parse_pid(raw: &str) -> Result<Pid, SchedulerError> {
    match raw.parse::<Pid>() {
        Ok(pid) if pid > 0 => Ok(pid),
        _ => Err(SchedulerError::InvalidInput(format!(
            "pid '{raw}' is not a positive integer"
        ))),
    }
}

fn expect_args(verb: &str, args: &[&str], min: usize, max: usize) -> Result<(), SchedulerError> {
    if args.len() < min || args.len() > max {
        return Err(SchedulerError::InvalidInput(format!(
            "'{verb}' takes {} argument(s), got {}; type 'help'",
            if min == max {
                min.to_string()
            } else {
                format!("{min} to {max}")
            },
            args.len()
        )));
    }
    Ok(())
}

/// Process table followed by the memory line.
pub fn render_process_table(processes: &[ProcessSnapshot], stats: &SystemStats) -> String {
    let rule = "-".repeat(47);
    let mut out = String::new();
    let _ = writeln!(out, "--- Process Table ---");
    let _ = writeln!(out, "| PID | Name       | Burst Time (ms) | Priority |");
    let _ = writeln!(out, "{rule}");
    for p in processes {
        let _ = writeln!(
            out,
            "| {:<3} | {:<10} | {:<15} | {:<8} |",
            p.pid, p.name, p.remaining_work, p.priority
        );
    }
    let _ = writeln!(out, "{rule}");
    let _ = write!(
        out,
        "Memory Used: {}MB / {}MB",
        stats.memory_used, stats.memory_limit
    );
    out
}

/// System statistics block.
pub fn render_stats(stats: &SystemStats) -> String {
    format!(
        "--- System Statistics ---\nTotal Memory: {}MB\nMemory Used: {}MB\nMemory Available: {}MB\nNumber of Processes: {}",
        stats.memory_limit, stats.memory_used, stats.memory_available, stats.ready_count
    )
}

/// Recent audit events, oldest first.
pub fn render_history(events: &[AuditEvent]) -> String {
    if events.is_empty() {
        return "no events recorded".to_string();
    }
    let mut out = String::new();
    for e in events {
        let pid = e.pid.map_or_else(|| "-".to_string(), |p| p.to_string());
        let _ = write!(out, "{:>13}  {:<9}  pid {:<5}", e.at_ms, format!("{:?}", e.action), pid);
        if let Some(detail) = &e.detail {
            let _ = write!(out, "  {detail}");
        }
        out.push('\n');
    }
    out.pop();
    out
}

/// Human-readable rendering of a response.
///
/// `Ready` is shown as a compact PID list; the shell prints the full table
/// with [`render_process_table`] instead.
pub fn render_response(response: &Response) -> String {
    match response {
        Response::Created { pid } => format!("Process {pid} created."),
        Response::Terminated { process } => {
            format!("Process {} ({}) terminated.", process.pid, process.name)
        }
        Response::Ready { processes } => {
            let pids: Vec<String> = processes.iter().map(|p| p.pid.to_string()).collect();
            format!("ready: [{}]", pids.join(", "))
        }
        Response::Completed { policy, events } => {
            let mut out = format!("Executing processes using {}...", policy_label(*policy));
            for e in events {
                let _ = write!(
                    out,
                    "\nProcess {}: {} completed (burst {}ms, {} step(s), finished at {}ms).",
                    e.pid, e.name, e.burst_time, e.steps, e.finished_at_ms
                );
            }
            let _ = write!(out, "\nAll processes executed ({}).", events.len());
            out
        }
        Response::Stats { stats } => render_stats(stats),
        Response::Error { message, .. } => format!("error: {message}"),
    }
}

const fn policy_label(policy: SchedulingPolicy) -> &'static str {
    match policy {
        SchedulingPolicy::Fcfs => "First-Come-First-Serve",
        SchedulingPolicy::Priority => "Priority Scheduling",
        SchedulingPolicy::Sjf => "Shortest Job First",
    }
}
