use dynmock::example::{methods, Calculator, CalculatorProxy, DivideError};
use dynmock::matcher::any;
use dynmock::{matchers, Error, Invocation, InvocationShape, Value};

fn add() -> InvocationShape {
    InvocationShape::new(methods::ADD.clone(), matchers![any(), any()]).unwrap()
}

fn divide() -> InvocationShape {
    InvocationShape::new(methods::DIVIDE.clone(), matchers![any(), any()]).unwrap()
}

#[test]
fn returns_fixed_value() {
    let calc = CalculatorProxy::new();
    calc.mock().setup(add()).returns(42).unwrap();

    assert_eq!(42, calc.add(1, 2));
    assert_eq!(Some(Value::new(42)), calc.mock().setup_list()[0].return_value());
}

#[test]
fn returns_value_computed_from_arguments() {
    let calc = CalculatorProxy::new();
    calc.mock()
        .setup(add())
        .returns_with(|a: &i32, b: &i32| a * b)
        .unwrap();

    assert_eq!(6, calc.add(2, 3));
    assert_eq!(20, calc.add(4, 5));
}

#[test]
fn returns_value_computed_without_arguments() {
    let calc = CalculatorProxy::new();
    calc.mock().setup(add()).returns_with(|| 7).unwrap();

    assert_eq!(7, calc.add(2, 3));
}

#[test]
fn returns_value_computed_from_invocation() {
    let calc = CalculatorProxy::new();
    calc.mock()
        .setup(add())
        .returns_with(|invocation: &Invocation| {
            invocation
                .arguments()
                .iter()
                .filter_map(|arg| arg.downcast_ref::<i32>())
                .sum::<i32>()
                * 10
        })
        .unwrap();

    assert_eq!(30, calc.add(1, 2));
}

#[test]
fn returns_default() {
    let calc = CalculatorProxy::new();
    calc.mock().setup(add()).returns_default().unwrap().verifiable();

    assert_eq!(0, calc.add(1, 2));
    assert!(calc.mock().verify().is_ok());
}

#[test]
fn throws_exception() {
    let calc = CalculatorProxy::new();
    calc.mock()
        .setup(divide())
        .throws(DivideError::DivideByZero);

    assert_eq!(Err(DivideError::DivideByZero), calc.divide(1, 1));

    let invocation = &calc.mock().invocations()[0];
    assert!(matches!(
        invocation.outcome(),
        Some(dynmock::Outcome::Threw(exception)) if exception.is::<DivideError>()
    ));
}

#[test]
fn at_most_limits_invocations() {
    let calc = CalculatorProxy::new();
    calc.mock().setup(add()).returns(1).unwrap().at_most(2);

    assert_eq!(1, calc.add(1, 2));
    assert_eq!(1, calc.add(1, 2));

    let mut invocation = Invocation::new(methods::ADD.clone(), vec![Value::new(1), Value::new(2)]);
    let err = calc.mock().invoke(&mut invocation).unwrap_err();

    assert!(matches!(
        err,
        Error::MoreThanNCalls {
            limit: 2,
            count: 3,
            ..
        }
    ));
}

#[test]
#[should_panic(expected = "Expected only 1 call(s)")]
fn at_most_once() {
    let calc = CalculatorProxy::new();
    calc.mock().setup(add()).returns(1).unwrap().at_most_once();

    calc.add(1, 2);
    calc.add(1, 2);
}

#[test]
fn at_most_last_write_wins() {
    let calc = CalculatorProxy::new();
    calc.mock()
        .setup(add())
        .at_most(1)
        .at_most(3)
        .returns(1)
        .unwrap();

    calc.add(1, 2);
    calc.add(1, 2);
    calc.add(1, 2);

    let mut invocation = Invocation::new(methods::ADD.clone(), vec![Value::new(1), Value::new(2)]);
    assert!(matches!(
        calc.mock().invoke(&mut invocation),
        Err(Error::MoreThanNCalls { limit: 3, .. })
    ));
}
