use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use calmform::components::Checkbox;
use calmform::{
    AutoMode, Component, Config, Factory, Form, FormConfig, FormError, FormSchema, I18n, Options,
    Path, Props, Schema, Value,
};

#[allow(dead_code)]
#[derive(FormSchema)]
enum Gender {
    Male,
    Female,
    #[form(label = "Prefer not to say")]
    Undisclosed,
}

#[allow(dead_code)]
#[derive(FormSchema)]
struct Person {
    name: Option<String>,
    age: f64,
    gender: Gender,
    newsletter: bool,
}

fn name_and_age() -> Arc<Schema> {
    Schema::composite(
        "Person",
        [
            ("name", Schema::optional(Schema::string())),
            ("age", Schema::number()),
        ],
    )
}

fn plain_form(schema: Arc<Schema>, value: Value) -> Form<String> {
    Form::new(schema, Options::new(), value, FormConfig::plain()).expect("form mounts")
}

#[test]
fn edits_are_parsed_into_a_branded_value() {
    let mut form = plain_form(name_and_age(), Value::Null);
    form.on_change("name", Value::string("")).expect("name exists");
    form.on_change("age", Value::string("42")).expect("age exists");

    let value = form.get_value().expect("form is valid");
    let person = value.as_struct().expect("valid composites are branded");
    assert_eq!(person.type_name, "Person");
    assert_eq!(person.fields.get("name"), Some(&Value::Null));
    assert_eq!(person.fields.get("age"), Some(&Value::Number(42.0)));
}

#[test]
fn required_enumeration_without_selection_is_invalid() {
    let mut form = plain_form(Gender::form_schema(), Value::Null);
    assert_eq!(form.get_value(), None);

    let raw = form.get_raw_value();
    assert_eq!(raw.value, Value::Null);
    assert_eq!(raw.errors.len(), 1);
    assert_eq!(
        raw.errors[0].message,
        "Invalid value null supplied to Gender"
    );
    assert!(form.root().state().has_error);
}

#[test]
fn derived_schemas_describe_the_rust_type() {
    let schema = Person::form_schema();
    assert_eq!(schema.name(), "Person");
    assert!(Arc::ptr_eq(&schema, &Person::form_schema()));

    let calmform::schema::Kind::Composite(composite) = schema.kind() else {
        panic!("structs derive composites");
    };
    let names: Vec<String> = composite
        .fields()
        .keys()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, ["name", "age", "gender", "newsletter"]);

    let calmform::schema::Kind::Enumeration(gender) = Gender::form_schema().kind().clone() else {
        panic!("unit enums derive enumerations");
    };
    let labels: Vec<String> = gender
        .members()
        .values()
        .map(|label| label.to_string())
        .collect();
    assert_eq!(labels, ["Male", "Female", "Prefer not to say"]);
}

#[test]
fn derived_form_renders_every_field_kind() {
    let value = Value::object([
        ("name", Value::string("Ada")),
        ("age", Value::Number(36.0)),
        ("gender", Value::string("Female")),
        ("newsletter", Value::Bool(true)),
    ]);
    let form = plain_form(Person::form_schema(), value);
    assert_eq!(
        form.render().expect("renders"),
        [
            "  Name (optional): [Ada]",
            "  Age: [36]",
            "  Gender: <Female>",
            "  [x] Newsletter",
        ]
        .join("\n")
    );
}

#[test]
fn change_callback_sees_the_aggregate_and_leaf_path() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let mut form = plain_form(name_and_age(), Value::Null)
        .with_on_change(move |value, path| sink.borrow_mut().push((value.clone(), path.clone())));

    form.on_change("age", Value::string("7")).expect("age exists");

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].1, Path::from("age"));
    assert_eq!(seen[0].0.get("age"), Some(&Value::string("7")));
}

#[test]
fn unknown_paths_are_rejected() {
    let mut form = plain_form(name_and_age(), Value::Null);
    let error = form
        .on_change("email", Value::string("a@b.c"))
        .expect_err("email is not a field");
    assert_eq!(
        error,
        FormError::UnknownPath {
            path: "email".to_string()
        }
    );
    assert!(form.component("age").is_some());
    assert!(form.component("email").is_none());
}

#[test]
fn config_without_templates_is_an_integrator_error() {
    let error = Form::new(
        name_and_age(),
        Options::<String>::new(),
        Value::Null,
        FormConfig::new(),
    )
    .err()
    .expect("templates are required");
    assert_eq!(error, FormError::MissingConfig("templates"));
}

#[test]
fn lists_cannot_be_mounted() {
    let error = Form::new(
        Schema::list(Schema::string()),
        Options::<String>::new(),
        Value::Null,
        FormConfig::plain(),
    )
    .err()
    .expect("lists have no component");
    assert!(matches!(error, FormError::UnsupportedType { .. }));
}

#[test]
fn set_value_rederives_edit_state() {
    let mut form = plain_form(name_and_age(), Value::Null);
    form.on_change("age", Value::string("draft")).expect("age exists");
    form.set_value(Value::object([("age", Value::Number(5.0))]))
        .expect("same schema");
    let age = form.component("age").expect("age is mounted");
    assert_eq!(age.state().value, Value::string("5"));
}

#[test]
fn set_schema_remounts_the_root() {
    let mut form = plain_form(Schema::string(), Value::string("yes"));
    assert_eq!(form.root().kind(), "textbox");
    form.set_schema(Schema::boolean()).expect("booleans mount");
    assert_eq!(form.root().kind(), "checkbox");
}

#[test]
fn set_options_switches_auto_mode() {
    let mut form = plain_form(name_and_age(), Value::Null);
    form.set_options(Options::new().auto(AutoMode::Placeholders))
        .expect("same schema");
    assert_eq!(
        form.render().expect("renders"),
        "  [Name (optional)]\n  [Age]".to_string()
    );
}

#[test]
fn localized_strings_reach_generated_labels() {
    let config = FormConfig::plain().with_i18n(I18n::for_locale("zh-CN"));
    let form = Form::new(name_and_age(), Options::new(), Value::Null, config).expect("form mounts");
    let name = form.component("name").expect("name is mounted");
    assert_eq!(name.base().label(), Some("Name（可选）".into()));
}

#[test]
fn field_factory_set_later_replaces_the_field() {
    let mut form = plain_form(name_and_age(), Value::Null);
    assert_eq!(form.component("age").expect("age is mounted").kind(), "textbox");

    let toggle = Factory::new(|props: Props<String>| {
        Ok(Box::new(Checkbox::new(props)?) as Box<dyn Component<String>>)
    });
    form.set_options(Options::new().field("age", Options::new().factory(toggle)))
        .expect("factory mounts");
    assert_eq!(form.component("age").expect("age is mounted").kind(), "checkbox");
    assert_eq!(form.component("name").expect("name is mounted").kind(), "textbox");
}

#[test]
fn edits_through_component_mut_reach_validation() {
    let mut form = plain_form(name_and_age(), Value::Null);
    form.component_mut("age")
        .expect("age is mounted")
        .on_change(Value::string("9"));
    assert!(form.component_mut("email").is_none());

    let value = form.get_value().expect("form is valid");
    let person = value.as_struct().expect("valid composites are branded");
    assert_eq!(person.fields.get("age"), Some(&Value::Number(9.0)));
}

#[test]
fn set_config_reaches_every_field() {
    let mut form = plain_form(name_and_age(), Value::Null);
    let mut config = Config::new();
    config.insert("density".into(), Value::string("compact"));
    form.set_config(config).expect("same schema");

    let age = form.component("age").expect("age is mounted");
    assert_eq!(
        age.base().config().get("density"),
        Some(&Value::string("compact"))
    );
    assert_eq!(
        form.root().base().config().get("density"),
        Some(&Value::string("compact"))
    );
}
