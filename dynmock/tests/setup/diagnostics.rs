use std::panic::Location;

use dynmock::example::{methods, CalculatorProxy};
use dynmock::matcher::eq;
use dynmock::{matchers, CallSiteResolver, InvocationShape, MockOptions, Switches};

fn add() -> InvocationShape {
    InvocationShape::new(methods::ADD.clone(), matchers![eq(1), eq(2)]).unwrap()
}

fn with_diagnostics() -> MockOptions {
    MockOptions::default().switches(Switches {
        collect_diagnostic_file_info: true,
    })
}

#[derive(Debug)]
struct PanickingResolver;

impl CallSiteResolver for PanickingResolver {
    fn resolve(&self, _location: &'static Location<'static>) -> Option<String> {
        panic!("no debug information available");
    }
}

#[derive(Debug)]
struct LineOnlyResolver;

impl CallSiteResolver for LineOnlyResolver {
    fn resolve(&self, location: &'static Location<'static>) -> Option<String> {
        Some(format!("at line {}", location.line()))
    }
}

#[test]
fn declaration_site_is_captured() {
    let calc = CalculatorProxy::with_options(with_diagnostics());
    let line = line!() + 1;
    let phrase = calc.mock().setup(add());

    let site = phrase.setup().declaration_site().unwrap();
    assert_eq!(format!("in diagnostics.rs: line {line}"), site);
    assert_eq!(
        format!("Calculator m => m.add(1, 2) (in diagnostics.rs: line {line})"),
        phrase.setup().to_string()
    );
}

#[test]
fn declaration_site_of_conditional_setup_is_captured() {
    let calc = CalculatorProxy::with_options(with_diagnostics());
    let phrase = calc.mock().when(|| true).setup(add());

    assert!(phrase
        .setup()
        .declaration_site()
        .unwrap()
        .starts_with("in diagnostics.rs: line "));
}

#[test]
fn custom_resolver() {
    let calc =
        CalculatorProxy::with_options(with_diagnostics().call_site_resolver(LineOnlyResolver));
    let line = line!() + 1;
    let phrase = calc.mock().setup(add());

    assert_eq!(
        Some(format!("at line {line}").as_str()),
        phrase.setup().declaration_site()
    );
}

#[test]
fn panicking_resolver_omits_declaration_site() {
    let calc =
        CalculatorProxy::with_options(with_diagnostics().call_site_resolver(PanickingResolver));
    let phrase = calc.mock().setup(add());

    assert_eq!(None, phrase.setup().declaration_site());
    assert_eq!("Calculator m => m.add(1, 2)", phrase.setup().to_string());
}

#[test]
fn no_declaration_site_without_diagnostics() {
    let calc = CalculatorProxy::with_options(MockOptions::default().switches(Switches::none()));
    let phrase = calc.mock().setup(add());

    assert_eq!(None, phrase.setup().declaration_site());
}
