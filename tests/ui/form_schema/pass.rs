use calmform::schema::Kind;
use calmform::{FormSchema, Value};

#[allow(dead_code)]
#[derive(calmform::FormSchema)]
enum Plan {
    Free,
    ProTeam,
}

#[allow(dead_code)]
#[derive(calmform::FormSchema)]
struct Signup {
    email: String,
    seats: u32,
    plan: Option<Plan>,
}

fn main() {
    let schema = Signup::form_schema();
    assert_eq!(schema.name(), "Signup");
    let Kind::Composite(composite) = schema.kind() else {
        panic!("expected a composite");
    };
    assert_eq!(composite.fields().len(), 3);
    assert_eq!(composite.field("seats").map(|seats| seats.name()), Some("Integer".into()));

    let plan = Plan::form_schema();
    let result = calmform::validate(&Value::string("ProTeam"), &plan, &calmform::Path::root());
    assert!(result.is_valid());
}
