use pretty_assertions::assert_eq;

use dynmock::example::{methods, Calculator, CalculatorProxy};
use dynmock::matcher::{any, eq};
use dynmock::{matchers, Error, InvocationShape, MockOptions, SetupFailure, Switches};

fn calc() -> CalculatorProxy {
    CalculatorProxy::with_options(MockOptions::default().switches(Switches::none()))
}

fn add(a: i32, b: i32) -> InvocationShape {
    InvocationShape::new(methods::ADD.clone(), matchers![eq(a), eq(b)]).unwrap()
}

fn reset() -> InvocationShape {
    InvocationShape::new(methods::RESET.clone(), matchers![]).unwrap()
}

fn failures(err: Error) -> Vec<SetupFailure> {
    match err {
        Error::Verification(failure) => failure.failures,
        err => panic!("Unexpected error: {err}"),
    }
}

#[test]
fn verify_succeeds_after_all_verifiable_setups_were_invoked() {
    let calc = calc();
    calc.mock().setup(add(1, 2)).returns(3).unwrap().verifiable();
    calc.mock().setup(reset()).verifiable();

    calc.add(1, 2);
    calc.reset();

    assert!(calc.mock().verify().is_ok());
}

#[test]
fn verify_ignores_setups_that_are_not_verifiable() {
    let calc = calc();
    calc.mock().setup(add(1, 2)).returns(3).unwrap();

    assert!(calc.mock().verify().is_ok());
}

#[test]
fn verify_lists_every_setup_that_was_not_invoked() {
    let calc = calc();
    calc.mock().setup(add(1, 2)).returns(3).unwrap().verifiable();
    calc.mock().setup(add(3, 4)).returns(7).unwrap().verifiable();
    calc.mock()
        .setup(reset())
        .verifiable_with("reset was never called");

    calc.add(3, 4);

    let err = calc.mock().verify().unwrap_err();
    assert_eq!(
        "Mock<dynmock::example::CalculatorProxy>:\n\
         This mock failed verification due to the following:\n\
         \n   \
         Calculator m => m.add(1, 2):\n   \
         This setup was not matched.\n\
         \n   \
         Calculator m => m.reset():\n   \
         reset was never called",
        err.to_string()
    );
    assert_eq!(
        vec![
            SetupFailure {
                setup: "Calculator m => m.add(1, 2)".into(),
                message: None,
            },
            SetupFailure {
                setup: "Calculator m => m.reset()".into(),
                message: Some("reset was never called".into()),
            },
        ],
        failures(err)
    );
}

#[test]
fn verify_ignores_overridden_setups() {
    let calc = calc();
    calc.mock().setup(add(1, 2)).returns(3).unwrap().verifiable();
    calc.mock().setup(add(1, 2)).returns(4).unwrap();

    assert!(calc.mock().verify().is_ok());
}

#[test]
fn verify_all_checks_every_setup() {
    let calc = calc();
    calc.mock().setup(add(1, 2)).returns(3).unwrap();
    calc.mock().setup(reset());

    calc.reset();

    let failures = failures(calc.mock().verify_all().unwrap_err());
    assert_eq!(1, failures.len());
    assert_eq!("Calculator m => m.add(1, 2)", failures[0].setup);

    calc.add(1, 2);
    assert!(calc.mock().verify_all().is_ok());
}

#[test]
fn verify_all_ignores_conditional_and_overridden_setups() {
    let calc = calc();
    calc.mock().when(|| false).setup(add(1, 2)).returns(0).unwrap();
    calc.mock()
        .setup(InvocationShape::new(methods::ADD.clone(), matchers![any(), any()]).unwrap())
        .returns(1)
        .unwrap();
    calc.mock()
        .setup(InvocationShape::new(methods::ADD.clone(), matchers![any(), any()]).unwrap())
        .returns(2)
        .unwrap();

    assert_eq!(2, calc.add(5, 6));
    assert!(calc.mock().verify_all().is_ok());
}

#[test]
fn conditional_setup_is_verified_by_verify() {
    let calc = calc();
    calc.mock()
        .when(|| true)
        .setup(add(1, 2))
        .returns(3)
        .unwrap()
        .verifiable();

    assert!(calc.mock().verify().is_err());

    calc.add(1, 2);
    assert!(calc.mock().verify().is_ok());
}
