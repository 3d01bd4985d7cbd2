//! Suspendable scan integration tests.
//!
//! These tests exercise the full pipeline through the public API:
//! 1. Build a `ProgramModel` describing methods, calls, and hierarchy edges
//! 2. Construct the call graph and override resolver
//! 3. Run the propagation engine (optionally seeded by a manual classifier)
//! 4. Verify the resulting suspendable / suspendable-super sets

use std::io::Cursor;

use suspscan::{
    scan_program, CallGraph, ManualSuspendableClassifier, MethodFlags, MethodId, MethodRecord,
    OverrideResolver, ProgramModel, Result, ScanResults, SuspendScan, TypeEdge,
};

fn id(owner: &str, name: &str, desc: &str) -> MethodId {
    MethodId::new(owner, name, desc)
}

fn method(model: &mut ProgramModel, id: &MethodId, calls: &[MethodId]) {
    model.push_method(MethodRecord::new(
        id.clone(),
        calls.to_vec(),
        MethodFlags::empty(),
    ));
}

fn primitive(model: &mut ProgramModel, id: &MethodId) {
    model.push_method(MethodRecord::new(
        id.clone(),
        Vec::new(),
        MethodFlags::SUSPEND_PRIMITIVE,
    ));
}

fn abstract_decl(model: &mut ProgramModel, id: &MethodId) {
    model.push_method(MethodRecord::new(
        id.clone(),
        Vec::new(),
        MethodFlags::ABSTRACT,
    ));
}

/// The interface-dispatch scenario the engine exists for:
///
/// - interface `IA` declares `foo(I)V` and `bar(I)V`
/// - class `A` has `foo(LIA;)V` calling `a.foo(0)` through the interface,
///   a no-arg `foo()V` and `bar(LIA;)V` forming a non-suspendable cycle
/// - class `B` implements `foo(I)V` by invoking the suspension primitive and
///   `bar(I)V` with an empty body
struct InterfaceScenario {
    park: MethodId,
    ia_foo: MethodId,
    ia_bar: MethodId,
    a_foo_ia: MethodId,
    a_foo_noargs: MethodId,
    a_bar_ia: MethodId,
    b_foo: MethodId,
    b_bar: MethodId,
}

impl InterfaceScenario {
    fn build() -> (ProgramModel, Self) {
        let scenario = InterfaceScenario {
            park: id("co/acme/Sched", "park", "()V"),
            ia_foo: id("co/acme/IA", "foo", "(I)V"),
            ia_bar: id("co/acme/IA", "bar", "(I)V"),
            a_foo_ia: id("co/acme/A", "foo", "(Lco/acme/IA;)V"),
            a_foo_noargs: id("co/acme/A", "foo", "()V"),
            a_bar_ia: id("co/acme/A", "bar", "(Lco/acme/IA;)V"),
            b_foo: id("co/acme/B", "foo", "(I)V"),
            b_bar: id("co/acme/B", "bar", "(I)V"),
        };

        let mut model = ProgramModel::new();
        primitive(&mut model, &scenario.park);
        abstract_decl(&mut model, &scenario.ia_foo);
        abstract_decl(&mut model, &scenario.ia_bar);
        method(&mut model, &scenario.a_foo_ia, &[scenario.ia_foo.clone()]);
        // foo() -> bar(IA) -> foo() is a cycle with no suspension in it.
        method(&mut model, &scenario.a_foo_noargs, &[scenario.a_bar_ia.clone()]);
        method(
            &mut model,
            &scenario.a_bar_ia,
            &[scenario.ia_bar.clone(), scenario.a_foo_noargs.clone()],
        );
        method(&mut model, &scenario.b_foo, &[scenario.park.clone()]);
        method(&mut model, &scenario.b_bar, &[]);
        model.push_type_edge(TypeEdge::new("co/acme/B", "co/acme/IA"));

        (model, scenario)
    }
}

#[test]
fn direct_suspension_seed() -> Result<()> {
    let park = id("co/acme/Sched", "park", "()V");
    let mut model = ProgramModel::new();
    primitive(&mut model, &park);

    let results = scan_program(&model, None)?;
    assert!(results.contains_suspendable(&park));
    assert_eq!(results.suspendable_count(), 1);
    assert_eq!(results.suspendable_super_count(), 0);
    Ok(())
}

#[test]
fn transitive_propagation_through_chain() -> Result<()> {
    let park = id("S", "park", "()V");
    let c = id("T", "c", "()V");
    let b = id("T", "b", "()V");
    let a = id("T", "a", "()V");
    let bystander = id("T", "other", "()V");

    let mut model = ProgramModel::new();
    primitive(&mut model, &park);
    method(&mut model, &c, &[park.clone()]);
    method(&mut model, &b, &[c.clone()]);
    method(&mut model, &a, &[b.clone()]);
    method(&mut model, &bystander, &[a.clone(), a.clone()]);

    let results = scan_program(&model, None)?;
    for m in [&park, &c, &b, &a, &bystander] {
        assert!(results.contains_suspendable(m), "{m} should be suspendable");
    }
    Ok(())
}

#[test]
fn cycle_without_suspension_terminates_empty() -> Result<()> {
    let a = id("T", "a", "()V");
    let b = id("T", "b", "()V");
    let selfrec = id("T", "selfrec", "()V");

    let mut model = ProgramModel::new();
    method(&mut model, &a, &[b.clone()]);
    method(&mut model, &b, &[a.clone()]);
    method(&mut model, &selfrec, &[selfrec.clone()]);

    let results = scan_program(&model, None)?;
    assert_eq!(results.suspendable_count(), 0);
    assert_eq!(results.suspendable_super_count(), 0);
    Ok(())
}

#[test]
fn suspendable_cycle_marks_every_member() -> Result<()> {
    let park = id("S", "park", "()V");
    let a = id("T", "a", "()V");
    let b = id("T", "b", "()V");

    let mut model = ProgramModel::new();
    primitive(&mut model, &park);
    method(&mut model, &a, &[b.clone()]);
    method(&mut model, &b, &[a.clone(), park.clone()]);

    let results = scan_program(&model, None)?;
    assert!(results.contains_suspendable(&a));
    assert!(results.contains_suspendable(&b));
    Ok(())
}

#[test]
fn override_propagation_through_interface() -> Result<()> {
    let (model, s) = InterfaceScenario::build();
    let results = scan_program(&model, None)?;

    // The implementation reaching the primitive.
    assert!(results.contains_suspendable(&s.b_foo));
    // The declaration it implements.
    assert!(results.contains_suspendable_super(&s.ia_foo));
    // The call through the interface type.
    assert!(results.contains_suspendable(&s.a_foo_ia));
    Ok(())
}

#[test]
fn no_propagation_across_unrelated_overload() -> Result<()> {
    let (model, s) = InterfaceScenario::build();
    let results = scan_program(&model, None)?;

    // foo()V shares a name with foo(LIA;)V but has a distinct descriptor.
    assert!(!results.contains_suspendable(&s.a_foo_noargs));
    Ok(())
}

#[test]
fn no_propagation_across_non_suspendable_override() -> Result<()> {
    let (model, s) = InterfaceScenario::build();
    let results = scan_program(&model, None)?;

    // bar(I)V has only a non-suspending implementation, so calling through
    // IA.bar does not taint the caller.
    assert!(!results.contains_suspendable(&s.b_bar));
    assert!(!results.contains_suspendable(&s.a_bar_ia));
    assert!(!results.contains_suspendable_super(&s.ia_bar));
    Ok(())
}

#[test]
fn concrete_overridden_base_is_not_reported_as_super() -> Result<()> {
    let park = id("S", "park", "()V");
    let base_step = id("co/acme/Base", "step", "()V");
    let sub_step = id("co/acme/Sub", "step", "()V");
    let caller = id("co/acme/Main", "run", "()V");

    let mut model = ProgramModel::new();
    primitive(&mut model, &park);
    method(&mut model, &base_step, &[]);
    method(&mut model, &sub_step, &[park.clone()]);
    method(&mut model, &caller, &[base_step.clone()]);
    model.push_type_edge(TypeEdge::new("co/acme/Sub", "co/acme/Base"));

    let results = scan_program(&model, None)?;
    // The call through the concrete base may dispatch to the suspendable
    // override, so the caller is suspendable...
    assert!(results.contains_suspendable(&caller));
    // ...but only abstract/interface declarations land in the super set.
    assert!(!results.contains_suspendable_super(&base_step));
    Ok(())
}

#[test]
fn unknown_call_targets_are_conservatively_ignored() -> Result<()> {
    let caller = id("T", "m", "()V");
    let external = id("java/lang/Thread", "sleep", "(J)V");

    let mut model = ProgramModel::new();
    method(&mut model, &caller, &[external.clone()]);

    let results = scan_program(&model, None)?;
    assert_eq!(results.suspendable_count(), 0);
    Ok(())
}

#[test]
fn manual_override_merge_seeds_unseen_methods() -> Result<()> {
    // A native method with no record anywhere in the model.
    let native = id("co/acme/NativeSched", "block", "()V");
    let caller = id("co/acme/Worker", "run", "()V");

    let mut model = ProgramModel::new();
    method(&mut model, &caller, &[native.clone()]);

    let classifier = ManualSuspendableClassifier::from_reader(
        Cursor::new("co/acme/NativeSched.block()V\n"),
        "inline",
    )?;

    let results = scan_program(&model, Some(&classifier))?;
    assert!(results.contains_suspendable(&native));
    assert!(results.contains_suspendable(&caller));
    Ok(())
}

#[test]
fn manual_supers_seed_interface_callers() -> Result<()> {
    // IA.foo has no suspendable implementation in the analyzed program, but a
    // supers resource declares one exists elsewhere.
    let ia_foo = id("co/acme/IA", "foo", "(I)V");
    let caller = id("co/acme/A", "run", "()V");

    let mut model = ProgramModel::new();
    abstract_decl(&mut model, &ia_foo);
    method(&mut model, &caller, &[ia_foo.clone()]);

    let classifier = ManualSuspendableClassifier::from_reader(Cursor::new(""), "empty")?
        .with_supers_reader(Cursor::new("co/acme/IA.foo(I)V\n"), "supers")?;

    let results = scan_program(&model, Some(&classifier))?;
    assert!(results.contains_suspendable_super(&ia_foo));
    assert!(results.contains_suspendable(&caller));
    Ok(())
}

#[test]
fn idempotent_across_runs() -> Result<()> {
    let (model, _) = InterfaceScenario::build();

    let graph = CallGraph::build(&model)?;
    let resolver = OverrideResolver::new(&model);
    let first = SuspendScan::new(&graph, &resolver).run();
    let second = SuspendScan::new(&graph, &resolver).run();

    assert_eq!(sorted(&first).0, sorted(&second).0);
    assert_eq!(sorted(&first).1, sorted(&second).1);

    // And a fresh graph from the same model agrees too.
    let third = scan_program(&model, None)?;
    assert_eq!(sorted(&first).0, sorted(&third).0);
    assert_eq!(sorted(&first).1, sorted(&third).1);
    Ok(())
}

#[test]
fn results_round_trip_through_classifier_format() -> Result<()> {
    let (model, _scenario) = InterfaceScenario::build();
    let results = scan_program(&model, None)?;

    let mut suspendables = Vec::new();
    results.write_suspendables(&mut suspendables)?;
    let mut supers = Vec::new();
    results.write_suspendable_supers(&mut supers)?;

    let reloaded = ManualSuspendableClassifier::from_reader(Cursor::new(suspendables), "out")?
        .with_supers_reader(Cursor::new(supers), "out-supers")?;

    assert!(reloaded.is_suspendable("co/acme/B", "foo", "(I)V"));
    assert!(reloaded.is_suspendable("co/acme/A", "foo", "(Lco/acme/IA;)V"));
    assert!(reloaded.is_super_suspendable("co/acme/IA", "foo", "(I)V"));
    assert!(!reloaded.is_suspendable("co/acme/A", "foo", "()V"));
    assert_eq!(reloaded.len(), results.suspendable_count());
    Ok(())
}

#[test]
fn cycle_through_override_edge_terminates() -> Result<()> {
    // B implements IA.step by calling back through the interface; the
    // propagation must not loop on the override fan-out.
    let park = id("S", "park", "()V");
    let ia_step = id("IA", "step", "()V");
    let b_step = id("B", "step", "()V");

    let mut model = ProgramModel::new();
    primitive(&mut model, &park);
    abstract_decl(&mut model, &ia_step);
    method(&mut model, &b_step, &[ia_step.clone(), park.clone()]);
    model.push_type_edge(TypeEdge::new("B", "IA"));

    let results = scan_program(&model, None)?;
    assert!(results.contains_suspendable(&b_step));
    assert!(results.contains_suspendable_super(&ia_step));
    Ok(())
}

fn sorted(results: &ScanResults) -> (Vec<String>, Vec<String>) {
    let mut suspendables: Vec<String> = results.suspendables().map(ToString::to_string).collect();
    let mut supers: Vec<String> = results
        .suspendable_supers()
        .map(ToString::to_string)
        .collect();
    suspendables.sort();
    supers.sort();
    (suspendables, supers)
}
