//! Ingestion and extraction integration tests

use proptest::prelude::*;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use vuf_core::{FieldValue, PlainReactivity, VufResult};
use vuf_forms::{
	ExtractOptions, FieldType, Form, FormDefinition, FormSchema, SubForm, downcast_form, field,
};

struct Child;

impl FormSchema for Child {
	fn generate() -> VufResult<Form> {
		Ok(Form::new(
			FormDefinition::new()
				.field("first", field(""))
				.field("last", field("")),
		))
	}
}

struct Item;

impl FormSchema for Item {
	fn generate() -> VufResult<Form> {
		Ok(Form::new(
			FormDefinition::new()
				.field("name", field(""))
				.field("price", field(Value::Null).kind(FieldType::Number)),
		))
	}
}

#[fixture]
fn order() -> Form {
	Form::new(
		FormDefinition::new()
			.field("title", field(""))
			.field(
				"child",
				field(FieldValue::null()).kind(FieldType::Form(SubForm::of::<Child, PlainReactivity>())),
			)
			.field(
				"items",
				field(FieldValue::List(Vec::new()))
					.kind(FieldType::Array)
					.sub_type(FieldType::Form(SubForm::of::<Item, PlainReactivity>())),
			),
	)
}

#[rstest]
fn test_round_trip_drops_blank_strings() {
	let form = Form::new(
		FormDefinition::new()
			.field("name", field(""))
			.field("email", field(""))
			.field("age", field(0)),
	);
	form.set_field_value("name", "John").unwrap();
	form.set_field_value("age", 30).unwrap();
	assert_eq!(Value::Object(form.get_json()), json!({"name": "John", "age": 30}));
}

#[rstest]
fn test_nested_ingestion(order: Form) {
	order
		.set_data(&json!({"title": "t", "child": {"first": "Taro"}}))
		.unwrap();
	assert_eq!(order.get_json()["child"]["first"], json!("Taro"));

	let child = order.get_field_value("child").unwrap();
	let child = downcast_form::<PlainReactivity>(child.as_form().unwrap()).unwrap();
	assert_eq!(child.get_field_value("first").unwrap(), "Taro");
}

#[rstest]
fn test_nested_forms_are_replaced_not_merged(order: Form) {
	order
		.set_data(&json!({"child": {"first": "Taro", "last": "Yamada"}}))
		.unwrap();
	let before = order.get_field_value("child").unwrap();

	order.set_data(&json!({"child": {"first": "Jiro"}})).unwrap();
	let after = order.get_field_value("child").unwrap();

	assert_ne!(before, after);
	assert_eq!(order.get_json()["child"], json!({"first": "Jiro"}));
}

#[rstest]
fn test_array_of_sub_forms(order: Form) {
	order
		.set_data(&json!({"items": [{"name": "i1"}, {"name": "i2", "price": "120"}]}))
		.unwrap();
	assert_eq!(
		order.get_json()["items"],
		json!([{"name": "i1"}, {"name": "i2", "price": 120}])
	);
	let items = order.get_field_value("items").unwrap();
	assert_eq!(items.as_list().map(<[FieldValue]>::len), Some(2));
}

#[rstest]
fn test_empty_array_of_sub_forms(order: Form) {
	order.set_data(&json!({"items": []})).unwrap();
	assert_eq!(order.get_json()["items"], json!([]));
}

#[rstest]
fn test_head_upper_on_nested_keeps_inner_keys(order: Form) {
	order.set_data(&json!({"Child": {"first": "Taro"}})).unwrap();
	let upper = order.get_json_head_upper(&ExtractOptions::default());
	assert_eq!(Value::Object(upper), json!({"Child": {"first": "Taro"}, "Items": []}));
}

#[rstest]
fn test_json_string(order: Form) {
	order.set_data(&json!({"title": "t"})).unwrap();
	let text = order
		.get_value_json_str(&ExtractOptions::new().keys(["title"]))
		.unwrap();
	assert_eq!(text, r#"{"title":"t"}"#);
}

proptest! {
	#[test]
	fn prop_set_then_extract(name in "[a-zA-Z]{1,12}", age in any::<i32>(), blank in any::<bool>()) {
		let form = Form::new(
			FormDefinition::new()
				.field("name", field(""))
				.field("memo", field(""))
				.field("age", field(0)),
		);
		form.set_data(&json!({"Name": name, "age": age, "memo": if blank { "" } else { "m" }})).unwrap();

		let json = form.get_json();
		prop_assert_eq!(&json["name"], &json!(name));
		prop_assert_eq!(&json["age"], &json!(age));
		prop_assert_eq!(json.contains_key("memo"), !blank);
	}
}
