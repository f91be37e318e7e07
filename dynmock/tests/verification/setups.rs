use pretty_assertions::assert_eq;

use dynmock::example::{methods, Calculator, CalculatorProxy};
use dynmock::matcher::{any, eq};
use dynmock::{matchers, InvocationShape, MockOptions, SetupInfo, Switches};

fn calc() -> CalculatorProxy {
    CalculatorProxy::with_options(MockOptions::default().switches(Switches::none()))
}

fn add_any() -> InvocationShape {
    InvocationShape::new(methods::ADD.clone(), matchers![any(), any()]).unwrap()
}

#[test]
fn setups_are_listed_in_declaration_order() {
    let calc = calc();
    calc.mock().setup(add_any()).returns(1).unwrap();
    calc.mock().setup(add_any()).returns(3).unwrap();
    calc.mock()
        .when(|| true)
        .setup(InvocationShape::new(methods::ADD.clone(), matchers![eq(1), eq(2)]).unwrap())
        .returns(2)
        .unwrap()
        .verifiable_with("add(1, 2) expected");

    assert_eq!(3, calc.add(5, 5));
    assert_eq!(2, calc.add(1, 2));

    assert_eq!(
        vec![
            SetupInfo {
                id: 0,
                expression: "Calculator m => m.add(any, any)".into(),
                is_conditional: false,
                is_overridden: true,
                is_verifiable: false,
                invocation_count: 0,
            },
            SetupInfo {
                id: 1,
                expression: "Calculator m => m.add(any, any)".into(),
                is_conditional: false,
                is_overridden: false,
                is_verifiable: false,
                invocation_count: 1,
            },
            SetupInfo {
                id: 2,
                expression: "add(1, 2) expected: Calculator m => m.add(1, 2)".into(),
                is_conditional: true,
                is_overridden: false,
                is_verifiable: true,
                invocation_count: 1,
            },
        ],
        calc.mock().setups()
    );
}

#[test]
fn conditional_setups_override_once_matched() {
    let calc = calc();
    calc.mock().setup(add_any()).returns(1).unwrap();
    calc.mock().when(|| true).setup(add_any()).returns(2).unwrap();

    let setups = calc.mock().setups();
    assert!(!setups[0].is_overridden);

    assert_eq!(2, calc.add(1, 1));

    let setups = calc.mock().setups();
    assert!(setups[0].is_overridden);
    assert!(!setups[1].is_overridden);
    assert!(setups[1].is_conditional);
}

#[test]
fn matched_setup_overrides_earlier_conditional_setups() {
    let calc = calc();
    calc.mock().when(|| true).setup(add_any()).returns(1).unwrap();
    calc.mock().when(|| true).setup(add_any()).returns(2).unwrap();

    assert_eq!(2, calc.add(1, 1));

    let setups = calc.mock().setups();
    assert!(setups[0].is_overridden);
    assert!(!setups[1].is_overridden);
}

#[test]
fn unmatched_invocations_are_tracked() {
    let calc = calc();
    calc.mock()
        .setup(InvocationShape::new(methods::ADD.clone(), matchers![eq(1), eq(2)]).unwrap())
        .returns(3)
        .unwrap();

    calc.add(1, 2);
    calc.add(2, 3);
    calc.reset();

    assert_eq!(3, calc.mock().invocations().len());

    let unmatched = calc.mock().unmatched_invocations();
    assert_eq!(2, unmatched.len());
    assert_eq!("add", unmatched[0].method().name());
    assert_eq!("reset", unmatched[1].method().name());
    assert!(calc.mock().invocations()[0].matching_setup().is_some());
}
