//! End-to-end tests through the `vuf` facade

use rstest::rstest;
use serde_json::json;
use std::rc::Rc;
use vuf::prelude::*;
use vuf::{EnvironmentConfig, validator};

struct Member;

impl FormSchema for Member {
	fn generate() -> VufResult<Form> {
		Ok(Form::new(
			FormDefinition::new()
				.field("name", field("").validate([rule::required()]))
				.field("age", field(FieldValue::null()).kind(FieldType::Number)),
		))
	}
}

fn team(env: Rc<RuleEnvironment>) -> Form {
	Form::with_options(
		FormDefinition::new()
			.field("teamName", field("").validate([rule::required(), rule::max_length(10)]))
			.field("code", field("").validate([rule!("codeFormat", 3)]))
			.field(
				"members",
				field(FieldValue::List(Vec::new()))
					.kind(FieldType::Array)
					.sub_type(FieldType::Form(SubForm::of::<Member, PlainReactivity>())),
			),
		FormOptions::new().environment(env),
	)
}

fn configured_env() -> Rc<RuleEnvironment> {
	let config: EnvironmentConfig = r#"
locale = "en"

[messages.en]
codeFormat = "Use {0} upper-case letters."
"#
	.parse()
	.unwrap();
	let env = RuleEnvironment::from_config(&config);
	env.register_validator(
		"codeFormat",
		validator(|value, _, params| {
			let len = params.first().and_then(|p| p.as_u64()).unwrap_or(0) as usize;
			let text = value.as_str().unwrap_or_default();
			Ok(text.len() == len && text.chars().all(|c| c.is_ascii_uppercase()))
		}),
	)
	.unwrap();
	Rc::new(env)
}

#[rstest]
fn test_ingest_validate_extract() {
	let form = team(configured_env());
	form.set_data(&json!({
		"TeamName": "Falcons",
		"Code": "abc",
		"Members": [{"Name": "Taro", "Age": "31"}, {"Name": "Hanako"}]
	}))
	.unwrap();

	assert!(!form.validate());
	assert_eq!(form.validation("code").unwrap().message, "Use 3 upper-case letters.");

	form.set_field_value("code", "ABC").unwrap();
	assert!(form.validate());

	assert_eq!(
		serde_json::Value::Object(form.get_json()),
		json!({
			"teamName": "Falcons",
			"code": "ABC",
			"members": [{"name": "Taro", "age": 31}, {"name": "Hanako"}]
		})
	);
}

#[rstest]
#[case("", "Required.")]
#[case("A very long team name", "Please enter no more than 10 characters.")]
fn test_team_name_messages(#[case] name: &str, #[case] expected: &str) {
	let form = team(configured_env());
	form.set_field_value("teamName", name).unwrap();
	assert!(!form.group_is_valid(Some(&["teamName"][..])));
	assert_eq!(form.validation("teamName").unwrap().message, expected);
}

#[rstest]
fn test_signal_backed_form_revalidates() {
	let form = Form::with_reactivity(
		FormDefinition::new().field("name", field("").validate([rule::required()])),
		SignalReactivity,
	);
	form.start_valid();
	form.validate_watch(false);
	assert!(form.validation("name").unwrap().error);

	form.field("name").unwrap().set("Taro");
	assert!(!form.validation("name").unwrap().error);
}
