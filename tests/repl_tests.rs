//! Integration tests for the REPL session and state machine

#[cfg(feature = "cli")]
mod repl_integration_tests {
    use libdfa::registry::Registry;
    use libdfa::repl::{
        Action, Command, CommandResult, ReplEvent, ReplPhase, ReplState, ReplStateMachine,
        SessionState,
    };

    fn state() -> ReplState {
        colored::control::set_override(false);
        ReplState::new(Registry::builtin().unwrap())
    }

    /// Feed one line through the machine, executing whatever it hands out.
    fn submit(machine: &mut ReplStateMachine, state: &mut ReplState, line: &str) -> Option<String> {
        match machine.on_input(ReplEvent::Line(line.to_string())) {
            Action::Show(output) => output,
            Action::Run(command) => {
                let result = command.execute(state);
                machine.on_result(result)
            }
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            Command::parse("select A").unwrap(),
            Command::Use { id: "A".into() }
        );
        assert_eq!(
            Command::parse("test 0110").unwrap(),
            Command::Check {
                input: "0110".into()
            }
        );
        assert_eq!(Command::parse("info").unwrap(), Command::Show);
        assert_eq!(Command::parse("ls").unwrap(), Command::List);
        assert_eq!(
            Command::parse("dot out.dot").unwrap(),
            Command::Render {
                path: Some("out.dot".into())
            }
        );
        assert_eq!(
            Command::parse("steps off").unwrap(),
            Command::Steps {
                enable: Some(false)
            }
        );
        assert_eq!(
            Command::parse("load more.json").unwrap(),
            Command::Load {
                path: "more.json".into()
            }
        );
        assert_eq!(Command::parse("QUIT").unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("use").is_err());
        assert!(Command::parse("use a b").is_err());
        assert!(Command::parse("steps maybe").is_err());
        assert!(Command::parse("load").is_err());
        assert!(Command::parse("frobnicate").is_err());
    }

    #[test]
    fn test_session_lifecycle() {
        let mut state = state();
        assert!(matches!(state.session, SessionState::Uninitialized));

        Command::Use { id: "a".into() }.execute(&mut state).unwrap();
        assert!(matches!(
            state.session,
            SessionState::Ready { last_run: None, .. }
        ));

        let result = Command::Check {
            input: "111000".into(),
        }
        .execute(&mut state)
        .unwrap();
        assert!(result.output.starts_with("VALID"));
        assert!(state.session.last_run().unwrap().is_accepted());

        let result = Command::Check {
            input: "1010101011".into(),
        }
        .execute(&mut state)
        .unwrap();
        assert!(result.output.starts_with("INVALID"));
        assert_eq!(
            state.session.last_run().unwrap().trace.last_state().as_str(),
            "8"
        );
    }

    #[test]
    fn test_load_failure_then_recovery() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state();
        state.select("b").unwrap();

        let missing = Command::Load {
            path: dir.path().join("missing.json"),
        };
        assert!(missing.execute(&mut state).is_err());
        assert!(matches!(state.session, SessionState::Error { .. }));
        assert!(Command::Show.execute(&mut state).is_err());

        Command::Use { id: "b".into() }.execute(&mut state).unwrap();
        assert!(Command::Show.execute(&mut state).is_ok());
    }

    #[test]
    fn test_load_registers_and_completes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parity.json");
        std::fs::write(
            &path,
            r#"{"id": "parity", "states": ["e", "o"], "input_symbols": ["1"],
                "transitions": {"e": {"1": "o"}, "o": {"1": "e"}},
                "initial_state": "e", "final_states": ["e"]}"#,
        )
        .unwrap();

        let mut state = state();
        let result = Command::Load { path }.execute(&mut state).unwrap();
        assert!(result.output.contains("parity"));

        Command::Use {
            id: "parity".into(),
        }
        .execute(&mut state)
        .unwrap();
        let report = state.check("11").unwrap();
        assert!(report.simulation.is_accepted());
    }

    #[test]
    fn test_machine_drives_session() {
        let mut machine = ReplStateMachine::new();
        let mut state = state();

        let output = submit(&mut machine, &mut state, "check 1").unwrap();
        assert!(output.contains("No automaton selected"));
        assert_eq!(machine.phase(), &ReplPhase::Ready);

        submit(&mut machine, &mut state, "use b");
        submit(&mut machine, &mut state, "check aa\\");
        assert!(matches!(machine.phase(), ReplPhase::Continuation { .. }));
        let output = submit(&mut machine, &mut state, "abb").unwrap();
        assert!(output.starts_with("VALID"));
        assert_eq!(state.session.last_run().unwrap().trace.input(), "aaabb");

        let output = submit(&mut machine, &mut state, "check ac").unwrap();
        assert!(output.starts_with("MALFORMED"));

        submit(&mut machine, &mut state, "exit");
        assert!(machine.is_terminal());
    }

    #[test]
    fn test_interrupt_cancels_continuation() {
        let mut machine = ReplStateMachine::new();
        let mut state = state();
        submit(&mut machine, &mut state, "check 01\\");
        machine.on_input(ReplEvent::Interrupted);
        assert_eq!(machine.phase(), &ReplPhase::Ready);
    }

    #[test]
    fn test_exit_result() {
        let result = CommandResult::exit("bye");
        assert!(result.should_exit);
        assert!(!result.settings_changed);
    }
}
