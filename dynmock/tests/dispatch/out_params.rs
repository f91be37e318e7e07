use dynmock::example::{methods, Calculator, CalculatorProxy};
use dynmock::matcher::{eq, out};
use dynmock::{matchers, InvocationShape};

#[test]
fn out_value_is_assigned() {
    let calc = CalculatorProxy::new();
    calc.mock()
        .setup(
            InvocationShape::new(
                methods::TRY_PARSE.clone(),
                matchers![eq(String::from("42")), out(42)],
            )
            .unwrap(),
        )
        .returns(true)
        .unwrap();

    let mut result = 0;
    assert!(calc.try_parse("42", &mut result));
    assert_eq!(42, result);

    let mut result = 7;
    assert!(!calc.try_parse("43", &mut result));
    assert_eq!(7, result);
}

#[test]
fn out_value_is_visible_to_callbacks() {
    let calc = CalculatorProxy::new();
    calc.mock()
        .setup(
            InvocationShape::new(
                methods::TRY_PARSE.clone(),
                matchers![eq(String::from("1")), out(1)],
            )
            .unwrap(),
        )
        .callback(|input: &String, result: &i32| {
            assert_eq!("1", input.as_str());
            assert_eq!(1, *result);
        })
        .unwrap()
        .returns(true)
        .unwrap();

    let mut result = 0;
    assert!(calc.try_parse("1", &mut result));
}
