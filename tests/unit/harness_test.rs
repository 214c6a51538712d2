//! Tests for harness preparation
//!
//! A harness plan resolves every configured expression, writes one runner
//! document per test file and drives each generated page.

use std::collections::BTreeMap;

use specrun::context::RunnerContext;
use specrun::harness::{HarnessError, HarnessPlan, RUNNER_SUFFIX};
use specrun::resolver::Resolver;
use specrun::roots::ResourceRoots;

use crate::common::{DollarTemplate, RecordingDriver, TestTree};

const TEMPLATE: &str = "<html><head>${bootstrapScripts}${sourceScripts}</head>\
                        <body>${testFiles}${testRunnerScript}</body></html>";

/// Build a tree with a template, bootstrap/source scripts and two tests
fn harness_tree() -> TestTree {
    let tree = TestTree::new();
    tree.write_file("tpl/Runner.html", TEMPLATE);
    tree.write_file("tpl/run.js", "runTests();");
    tree.write_file("boot/env.js", "var env = {};");
    tree.write_file("src/widget.js", "var widget = {};");
    tree.write_file("test/WidgetTest.js", "test('widget');");
    tree.write_file("test/OtherTest.js", "test('other');");
    tree
}

fn harness_context(tree: &TestTree) -> RunnerContext {
    let properties: BTreeMap<String, String> = [
        ("testRunnerTemplate", tree.file_expression("tpl/Runner.html")),
        ("testRunnerScript", tree.file_expression("tpl/run.js")),
        ("bootstrapScripts", tree.file_expression("boot/*.js")),
        ("sourceScripts", tree.file_expression("src/*.js")),
        ("testFiles", tree.file_expression("test/*Test.js")),
        (
            "outputDirectory",
            tree.path().join("out").display().to_string(),
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    RunnerContext::from_properties(&properties).unwrap()
}

// =============================================================================
// Plan Building Tests
// =============================================================================

#[test]
fn build_resolves_every_expression() {
    let tree = harness_tree();
    let resolver = Resolver::new(ResourceRoots::new());
    let plan = HarnessPlan::build(&harness_context(&tree), &resolver).unwrap();

    assert_eq!(plan.template(), &tree.file_locator("tpl/Runner.html"));
    assert_eq!(plan.runner_script(), Some(&tree.file_locator("tpl/run.js")));
    assert_eq!(plan.bootstrap_scripts(), &[tree.file_locator("boot/env.js")]);
    assert_eq!(plan.source_scripts(), &[tree.file_locator("src/widget.js")]);
    assert_eq!(
        plan.test_files(),
        &[
            tree.file_locator("test/OtherTest.js"),
            tree.file_locator("test/WidgetTest.js"),
        ]
    );
}

#[test]
fn build_requires_a_template() {
    let tree = harness_tree();
    let mut context = harness_context(&tree);
    context.test_runner_template = None;

    let resolver = Resolver::new(ResourceRoots::new());
    let err = HarnessPlan::build(&context, &resolver).unwrap_err();
    assert!(matches!(err, HarnessError::MissingTemplate));
}

#[test]
fn build_requires_an_output_directory() {
    let tree = harness_tree();
    let mut context = harness_context(&tree);
    context.output_directory = None;

    let resolver = Resolver::new(ResourceRoots::new());
    let err = HarnessPlan::build(&context, &resolver).unwrap_err();
    assert!(matches!(err, HarnessError::MissingOutputDirectory));
}

#[test]
fn build_rejects_a_template_expression_matching_nothing() {
    let tree = harness_tree();
    let mut context = harness_context(&tree);
    context.test_runner_template = Some(tree.file_expression("tpl/Missing*.html"));

    let resolver = Resolver::new(ResourceRoots::new());
    let err = HarnessPlan::build(&context, &resolver).unwrap_err();
    assert!(matches!(err, HarnessError::EmptyExpansion { .. }));
}

#[test]
fn template_vars_carry_script_tags() {
    let tree = harness_tree();
    let resolver = Resolver::new(ResourceRoots::new());
    let plan = HarnessPlan::build(&harness_context(&tree), &resolver).unwrap();

    let test = &plan.test_files()[0];
    let vars = plan.template_vars(test);
    let bootstrap = &vars["bootstrapScripts"];
    assert!(bootstrap.contains("<script type=\"text/javascript\" src=\"file://"));
    assert!(bootstrap.contains("boot/env.js"));
    assert!(vars["testFiles"].contains("OtherTest.js"));
}

// =============================================================================
// Runner Generation Tests
// =============================================================================

#[test]
fn write_runner_files_generates_one_document_per_test() {
    let tree = harness_tree();
    let resolver = Resolver::new(ResourceRoots::new());
    let plan = HarnessPlan::build(&harness_context(&tree), &resolver).unwrap();

    let written = plan.write_runner_files(&DollarTemplate).unwrap();
    assert_eq!(written.len(), 2);

    let other = tree.path().join("out").join(format!("OtherTest{RUNNER_SUFFIX}"));
    let widget = tree.path().join("out").join(format!("WidgetTest{RUNNER_SUFFIX}"));
    assert!(other.is_file());
    assert!(widget.is_file());

    let rendered = std::fs::read_to_string(&widget).unwrap();
    assert!(rendered.contains("WidgetTest.js"));
    assert!(rendered.contains("boot/env.js"));
    assert!(rendered.contains("tpl/run.js"));
    assert!(!rendered.contains("${"));
}

#[test]
fn template_can_live_inside_an_archive() {
    let tree = harness_tree();
    let archive = tree.write_archive("runner.jar", &[("tpl/Packaged.html", TEMPLATE)]);

    let mut context = harness_context(&tree);
    context.test_runner_template = Some("classpath:/tpl/Packaged.html".to_string());

    let resolver = Resolver::new(ResourceRoots::new().with(&archive).unwrap());
    let plan = HarnessPlan::build(&context, &resolver).unwrap();
    let written = plan.write_runner_files(&DollarTemplate).unwrap();
    assert_eq!(written.len(), 2);
}

// =============================================================================
// Drive Tests
// =============================================================================

#[test]
fn run_visits_every_generated_runner() {
    let tree = harness_tree();
    let resolver = Resolver::new(ResourceRoots::new());
    let plan = HarnessPlan::build(&harness_context(&tree), &resolver).unwrap();

    let mut driver = RecordingDriver::default();
    let written = plan.run(&DollarTemplate, &mut driver).unwrap();

    assert_eq!(driver.visited.len(), 2);
    assert_eq!(driver.visited, written.iter().map(|l| l.as_uri()).collect::<Vec<_>>());
}

#[test]
fn run_stops_at_the_first_driver_failure() {
    let tree = harness_tree();
    let resolver = Resolver::new(ResourceRoots::new());
    let plan = HarnessPlan::build(&harness_context(&tree), &resolver).unwrap();

    let mut driver = RecordingDriver {
        fail_on: Some(format!("OtherTest{RUNNER_SUFFIX}")),
        ..RecordingDriver::default()
    };
    let err = plan.run(&DollarTemplate, &mut driver).unwrap_err();
    assert!(matches!(err, HarnessError::Driver(_)));
    assert!(driver.visited.is_empty());
}
