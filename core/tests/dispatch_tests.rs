use std::sync::{Arc, Mutex};

use slackbot_core::{
    Command, CommandRegistry, Event, OptionError, OptionField, OptionShape, Outbound,
    RecordingMessenger, parse_options, render_help, tokenize, try_execute,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn desc_shape() -> OptionShape {
    OptionShape::new().with_field(
        OptionField::string("Desc")
            .with_default("true")
            .with_choices(["false", "true"]),
    )
}

fn channel_event(text: &str) -> Event {
    Event::new()
        .with("type", "message")
        .with("channel", "C100")
        .with("user", "U200")
        .with("event_ts", "1700000000.000100")
        .with("text", text)
}

fn dispatch(registry: &CommandRegistry, messenger: &RecordingMessenger, text: &str) -> bool {
    let event = channel_event(text);
    try_execute(registry, messenger, &event, &tokenize(event.text()))
}

// ---------------------------------------------------------------------------
// Option parsing scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_a_default_is_used_without_tokens() {
    let command = Command::new("test", |_| {}).with_options(desc_shape());
    let options = parse_options(&command, &[]).unwrap();
    assert_eq!(options.get_str("Desc"), Some("true"));
}

#[test]
fn scenario_b_supplied_choice_is_used() {
    let command = Command::new("test", |_| {}).with_options(desc_shape());
    let options = parse_options(&command, &["false".to_string()]).unwrap();
    assert_eq!(options.get_str("Desc"), Some("false"));
}

#[test]
fn scenario_c_invalid_choice_reports_verbose_help() {
    let command = Command::new("test", |_| {})
        .with_help("message")
        .with_options(desc_shape());
    let err = parse_options(&command, &["invalid".to_string()]).unwrap_err();

    assert!(matches!(err, OptionError::Usage { .. }));
    let text = err.to_string();
    assert!(text.contains("option error."));
    assert!(text.contains(&render_help(&command, true)));
}

#[test]
fn scenario_d_verbose_boolean_help() {
    let command = Command::new("test", |_| {})
        .with_help("message")
        .with_options(
            OptionShape::new().with_field(OptionField::boolean("Desc").with_default(true)),
        );
    assert_eq!(
        render_help(&command, true),
        "test [Desc(false,*true*)] : *_message_*"
    );
}

// ---------------------------------------------------------------------------
// Dispatch scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_e_ping_replies_pong() {
    let mut registry = CommandRegistry::new();
    registry.setup(Vec::new()).unwrap();
    let messenger = RecordingMessenger::new();

    assert!(dispatch(&registry, &messenger, "ping"));
    assert_eq!(
        messenger.sent(),
        vec![Outbound::Thread {
            channel: "C100".into(),
            thread_ts: "1700000000.000100".into(),
            text: "pong! :table_tennis_paddle_and_ball:".into(),
        }]
    );
}

#[test]
fn scenario_f_unregistered_command_is_not_handled() {
    let mut registry = CommandRegistry::new();
    registry.setup(Vec::new()).unwrap();
    let messenger = RecordingMessenger::new();

    assert!(!dispatch(&registry, &messenger, "deploy production"));
    assert!(messenger.sent().is_empty());
}

#[test]
fn help_lists_commands_in_registration_order() {
    let mut registry = CommandRegistry::new();
    registry
        .setup([Command::new("repeat", |_| {})
            .with_help("Repeat input message.")
            .with_options(
                OptionShape::new()
                    .with_field(OptionField::string("Message"))
                    .with_field(OptionField::integer("Count").with_default(1).with_min(1).with_max(10)),
            )])
        .unwrap();
    let messenger = RecordingMessenger::new();

    assert!(dispatch(&registry, &messenger, "help"));
    assert_eq!(
        messenger.sent(),
        vec![Outbound::Ephemeral {
            channel: "C100".into(),
            user: "U200".into(),
            text: "help [Description(false,*true*)] : *_Displays all of the help commands._*\n\
                   ping\n\
                   repeat [Message] [Count(*1*,min:1,max:10)] : *_Repeat input message._*\n"
                .into(),
        }]
    );
}

#[test]
fn help_argument_overrides_default_verbosity() {
    let mut registry = CommandRegistry::with_builtins();
    registry.set_default_help_verbosity(false);
    let messenger = RecordingMessenger::new();

    assert!(dispatch(&registry, &messenger, "help"));
    assert_eq!(
        messenger.take()[0].text(),
        "help [Description(*false*)]\nping\n"
    );

    assert!(dispatch(&registry, &messenger, "help true"));
    assert_eq!(
        messenger.take()[0].text(),
        "help [Description(*false*,true)] : *_Displays all of the help commands._*\nping\n"
    );
}

#[test]
fn help_invalid_argument_replies_usage() {
    let registry = CommandRegistry::with_builtins();
    let messenger = RecordingMessenger::new();

    assert!(dispatch(&registry, &messenger, "help maybe"));
    let sent = messenger.sent();
    assert_eq!(sent.len(), 1);
    assert!(matches!(&sent[0], Outbound::Thread { .. }));
    assert!(sent[0].text().starts_with("option error.\nhelp [Description("));
}

#[test]
fn handler_receives_typed_options() {
    let seen = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    let mut registry = CommandRegistry::new();
    registry
        .setup([Command::new("scale", move |inv| {
            *sink.lock().unwrap() = Some((
                inv.options.get_str("Service").map(String::from),
                inv.options.get_int("Replicas"),
                inv.options.get_bool("DryRun"),
            ));
        })
        .with_options(
            OptionShape::new()
                .with_field(OptionField::string("Service").with_choices(["api", "worker"]))
                .with_field(OptionField::integer("Replicas").with_default(1).with_min(0).with_max(20))
                .with_field(OptionField::boolean("DryRun").with_default(true)),
        )])
        .unwrap();
    let messenger = RecordingMessenger::new();

    assert!(dispatch(&registry, &messenger, "scale   worker 5 false extra"));
    assert_eq!(
        *seen.lock().unwrap(),
        Some((Some("worker".to_string()), Some(5), Some(false)))
    );
    assert!(messenger.sent().is_empty());
}

#[test]
fn failed_invocation_does_not_affect_next_dispatch() {
    let mut registry = CommandRegistry::new();
    registry
        .setup([Command::new("scale", |inv| inv.reply("scaled"))
            .with_options(OptionShape::new().with_field(
                OptionField::integer("Replicas").with_min(0).with_max(20),
            ))])
        .unwrap();
    let messenger = RecordingMessenger::new();

    assert!(dispatch(&registry, &messenger, "scale 99"));
    assert!(messenger.take()[0].text().starts_with("option error."));

    assert!(dispatch(&registry, &messenger, "scale 3"));
    assert_eq!(messenger.take()[0].text(), "scaled");
}

#[test]
fn reregistered_command_listed_twice_with_newest_definition() {
    let mut registry = CommandRegistry::new();
    registry
        .setup([
            Command::new("deploy", |_| {})
                .with_help("old")
                .with_options(OptionShape::new().with_field(OptionField::boolean("Force").with_default(false))),
            Command::new("deploy", |_| {})
                .with_help("new")
                .with_options(OptionShape::new().with_field(OptionField::boolean("Force").with_default(false))),
        ])
        .unwrap();
    let messenger = RecordingMessenger::new();

    assert!(dispatch(&registry, &messenger, "help"));
    let text = messenger.sent()[0].text().to_string();
    assert_eq!(text.matches("deploy [Force(*false*,true)] : *_new_*").count(), 2);
    assert!(!text.contains("*_old_*"));
}
