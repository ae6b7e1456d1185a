//! Tests for the command surface

use procsim::core::{ProcessScheduler, ReleasePolicy, SchedulingPolicy};
use procsim::infra::NullProcessStore;
use procsim::runtime::cli::{render_response, render_stats};
use procsim::runtime::{dispatch, parse_line, Command, ErrorKind, Response, ShellInput};
use procsim::util::VirtualClock;

fn scheduler() -> ProcessScheduler<NullProcessStore, VirtualClock> {
    ProcessScheduler::new(
        1000,
        500,
        ReleasePolicy::Reserved,
        NullProcessStore,
        VirtualClock::new(),
    )
}

#[test]
fn test_command_json_shape() {
    let cmd: Command =
        serde_json::from_str(r#"{"op":"create","name":"init","burst_time":300}"#).unwrap();
    assert_eq!(
        cmd,
        Command::Create {
            name: "init".into(),
            burst_time: 300,
            priority: 0
        }
    );

    let cmd: Command = serde_json::from_str(r#"{"op":"run","policy":"sjf"}"#).unwrap();
    assert_eq!(
        cmd,
        Command::Run {
            policy: SchedulingPolicy::Sjf
        }
    );
}

#[test]
fn test_response_json_shape() {
    let json = serde_json::to_value(Response::Created { pid: 3 }).unwrap();
    assert_eq!(json["status"], "created");
    assert_eq!(json["pid"], 3);
}

#[tokio::test]
async fn test_dispatch_lifecycle() {
    let mut s = scheduler();

    let created = dispatch(
        &mut s,
        Command::Create {
            name: "init".into(),
            burst_time: 700,
            priority: 2,
        },
    )
    .await;
    assert_eq!(created, Response::Created { pid: 1 });

    match dispatch(&mut s, Command::ListReady).await {
        Response::Ready { processes } => {
            assert_eq!(processes.len(), 1);
            assert_eq!(processes[0].name, "init");
            assert_eq!(processes[0].remaining_work, 700);
        }
        other => panic!("unexpected {other:?}"),
    }

    match dispatch(
        &mut s,
        Command::Run {
            policy: SchedulingPolicy::Fcfs,
        },
    )
    .await
    {
        Response::Completed { policy, events } => {
            assert_eq!(policy, SchedulingPolicy::Fcfs);
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].steps, 2);
        }
        other => panic!("unexpected {other:?}"),
    }

    match dispatch(&mut s, Command::Stats).await {
        Response::Stats { stats } => {
            assert_eq!(stats.memory_used, 0);
            assert_eq!(stats.ready_count, 0);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_dispatch_maps_errors() {
    let mut s = scheduler();

    let response = dispatch(&mut s, Command::Terminate { pid: 9 }).await;
    assert!(response.is_error());
    assert!(matches!(
        response,
        Response::Error {
            kind: ErrorKind::NotFound,
            ..
        }
    ));

    let response = dispatch(
        &mut s,
        Command::Run {
            policy: SchedulingPolicy::Priority,
        },
    )
    .await;
    assert!(matches!(
        response,
        Response::Error {
            kind: ErrorKind::EmptyQueue,
            ..
        }
    ));

    let response = dispatch(
        &mut s,
        Command::Create {
            name: "huge".into(),
            burst_time: 1001,
            priority: 0,
        },
    )
    .await;
    assert!(matches!(
        response,
        Response::Error {
            kind: ErrorKind::InsufficientMemory,
            ..
        }
    ));
}

#[test]
fn test_shell_history_and_render() {
    assert_eq!(parse_line("history").unwrap(), Some(ShellInput::History));
    assert_eq!(
        render_response(&Response::Created { pid: 4 }),
        "Process 4 created."
    );

    let s = scheduler();
    let rendered = render_stats(&s.stats());
    assert!(rendered.starts_with("--- System Statistics ---"));
    assert!(rendered.contains("Total Memory: 1000MB"));
    assert!(rendered.contains("Memory Available: 1000MB"));
    assert!(rendered.contains("Number of Processes: 0"));
}
