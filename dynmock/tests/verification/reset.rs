use dynmock::example::{methods, Calculator, CalculatorProxy};
use dynmock::matcher::any;
use dynmock::{matchers, InvocationShape};

fn add() -> InvocationShape {
    InvocationShape::new(methods::ADD.clone(), matchers![any(), any()]).unwrap()
}

#[test]
fn reset_calls_forgets_invocations() {
    let calc = CalculatorProxy::new();
    calc.mock().setup(add()).returns(1).unwrap().verifiable();

    calc.add(1, 2);
    calc.reset();
    assert_eq!(2, calc.mock().invocations().len());
    assert_eq!(1, calc.mock().setups()[0].invocation_count);

    calc.mock().reset_calls();

    assert!(calc.mock().invocations().is_empty());
    assert!(calc.mock().unmatched_invocations().is_empty());
    assert_eq!(0, calc.mock().setups()[0].invocation_count);
    assert!(calc.mock().verify().is_err());
}

#[test]
fn reset_calls_resets_limits() {
    let calc = CalculatorProxy::new();
    calc.mock().setup(add()).returns(1).unwrap().at_most_once();

    assert_eq!(1, calc.add(1, 2));

    calc.mock().reset_calls();

    assert_eq!(1, calc.add(1, 2));
}

#[test]
fn reset_calls_keeps_setups() {
    let calc = CalculatorProxy::new();
    calc.mock().setup(add()).returns(7).unwrap();

    calc.mock().reset_calls();

    assert_eq!(1, calc.mock().setups().len());
    assert_eq!(7, calc.add(1, 2));
}
