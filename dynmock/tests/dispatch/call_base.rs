use dynmock::example::{methods, Calculator, CalculatorProxy, DivideError};
use dynmock::matcher::{any, eq};
use dynmock::{matchers, Error, Invocation, InvocationShape, MockOptions, Value};

#[test]
fn setup_calls_base() {
    let calc = CalculatorProxy::new();
    calc.mock()
        .setup(InvocationShape::new(methods::ADD.clone(), matchers![eq(1), any()]).unwrap())
        .call_base()
        .unwrap();

    assert_eq!(3, calc.add(1, 2));
    assert_eq!(0, calc.add(2, 2));
}

#[test]
fn loose_mock_with_call_base() {
    let calc = CalculatorProxy::with_options(MockOptions::default().call_base(true));

    assert_eq!(5, calc.add(2, 3));
    assert_eq!(6, calc.sum_all(&[1, 2, 3]));
}

#[test]
fn exceptions_of_base_are_passed_through() {
    let calc = CalculatorProxy::with_options(MockOptions::default().call_base(true));

    assert_eq!(Ok(2), calc.divide(4, 2));
    assert_eq!(Err(DivideError::DivideByZero), calc.divide(4, 0));
}

#[test]
fn missing_base_implementation() {
    let calc = CalculatorProxy::new();
    calc.mock()
        .setup(InvocationShape::new(methods::ADD.clone(), matchers![any(), any()]).unwrap())
        .call_base()
        .unwrap();

    let mut invocation = Invocation::new(methods::ADD.clone(), vec![Value::new(1), Value::new(2)]);
    let err = calc.mock().invoke(&mut invocation).unwrap_err();

    assert!(matches!(err, Error::NoBaseImplementation { .. }));
}
