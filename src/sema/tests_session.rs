use super::scope::{Scope, Symbol, SymbolCategory};
use super::scope_stack::{ScopeLevel, ScopeStack};
use super::session::Session;
use super::type_registry::TypeRegistry;
use super::types::TypeId;

#[test]
fn local_bindings_shadow_global_ones() {
    let registry = TypeRegistry::new();
    let mut stack = ScopeStack::new();

    let mut global = Scope::new();
    global.insert("x", Symbol::variable(0, TypeId::INT), &registry);
    stack.push(global);

    let mut local = Scope::new();
    local.insert("x", Symbol::variable(0, TypeId::FLOAT), &registry);
    local.insert("tmp", Symbol::variable(4, TypeId::INT), &registry);
    stack.push(local);

    let (level, scope) = stack.resolve("x").unwrap();
    assert_eq!(level, ScopeLevel::Local);
    assert_eq!(scope.lookup("x").unwrap().type_id, TypeId::FLOAT);

    stack.pop();

    let (level, scope) = stack.resolve("x").unwrap();
    assert_eq!(level, ScopeLevel::Global);
    assert_eq!(scope.lookup("x").unwrap().type_id, TypeId::INT);

    // Popped locals are gone for good.
    assert!(stack.resolve("tmp").is_none());
}

#[test]
fn global_only_name_resolves_through_a_local_frame() {
    let registry = TypeRegistry::new();
    let mut stack = ScopeStack::new();

    let mut global = Scope::new();
    global.insert("g", Symbol::variable(0, TypeId::INT), &registry);
    stack.push(global);
    stack.push(Scope::new());

    let (level, _) = stack.resolve("g").unwrap();
    assert_eq!(level, ScopeLevel::Global);
}

#[test]
fn resolution_never_reaches_middle_frames() {
    let registry = TypeRegistry::new();
    let mut stack = ScopeStack::new();

    stack.push(Scope::new());

    let mut middle = Scope::new();
    middle.insert("hidden", Symbol::variable(0, TypeId::INT), &registry);
    stack.push(middle);
    stack.push(Scope::new());

    assert!(stack.resolve("hidden").is_none());
}

#[test]
fn resolve_on_a_single_frame_reports_global() {
    let registry = TypeRegistry::new();
    let mut stack = ScopeStack::new();

    let mut global = Scope::new();
    global.insert("x", Symbol::variable(0, TypeId::INT), &registry);
    stack.push(global);

    let (level, _) = stack.resolve("x").unwrap();
    assert_eq!(level, ScopeLevel::Global);
}

#[test]
fn stack_operations_tolerate_emptiness() {
    let mut stack = ScopeStack::new();

    assert!(stack.pop().is_none());
    assert!(stack.peek().is_none());
    assert!(stack.base().is_none());
    assert!(stack.resolve("anything").is_none());
}

#[test]
fn session_registers_globals_and_functions() {
    let mut session = Session::new();

    session.declare_global_variable("count", "int");
    session.declare_global_array("grid", "float", &[2, 3]);
    session.declare_function("max", "int", &["int".to_string(), "int".to_string()]);

    let global = session.scopes().base().unwrap();
    assert_eq!(global.lookup("count").unwrap().type_id, TypeId::INT);

    let grid = global.lookup("grid").unwrap();
    assert_eq!(session.types().name_of(grid.type_id), "float[2][3]");
    assert_eq!(session.types().size_of(grid.type_id), 24);

    let key = Scope::overload_key("max", &[TypeId::INT, TypeId::INT]);
    let max = global.lookup(&key).unwrap();
    assert_eq!(max.category, SymbolCategory::Function);
    assert_eq!(max.type_id, TypeId::INT);
}

#[test]
fn session_struct_declaration_binds_name_and_type() {
    let mut session = Session::new();

    let fields = vec![
        ("x".to_string(), "int".to_string()),
        ("y".to_string(), "float".to_string()),
    ];
    session.declare_struct("Point", &fields);

    let global = session.scopes().base().unwrap();
    let sym = global.lookup("Point").unwrap();
    assert_eq!(sym.category, SymbolCategory::Struct);

    assert_eq!(session.types().size_of(sym.type_id), 8);
    let members = session.types().member_scope_of(sym.type_id).unwrap();
    assert_eq!(members.lookup("y").unwrap().offset, 4);
}

#[test]
fn session_local_scope_roundtrip() {
    let mut session = Session::new();
    session.declare_global_variable("x", "int");

    let mut locals = session.new_local_scope();
    session.declare_local_variable(&mut locals, "x", "float");
    session.declare_local_array(&mut locals, "buf", "int", &[8]);
    session.push_local_scope(locals);

    let (level, scope) = session.scopes().resolve("x").unwrap();
    assert_eq!(level, ScopeLevel::Local);
    assert_eq!(scope.lookup("x").unwrap().type_id, TypeId::FLOAT);
    assert_eq!(scope.lookup("buf").unwrap().offset, 4);

    session.pop_local_scope();
    let (level, _) = session.scopes().resolve("x").unwrap();
    assert_eq!(level, ScopeLevel::Global);
}

#[test]
fn sessions_are_isolated_from_each_other() {
    let mut first = Session::new();
    first.declare_struct("Point", &[("x".to_string(), "int".to_string())]);
    first.declare_global_array("grid", "int", &[4]);

    let mut second = Session::new();
    assert_eq!(second.types_mut().find_by_name("Point"), None);
    assert_eq!(second.types_mut().find_by_name("int[4]"), None);
    assert!(second.scopes().resolve("grid").is_none());

    // A fresh session and a reset registry look the same to queries.
    first.types_mut().reset();
    assert_eq!(first.types_mut().find_by_name("Point"), None);
    assert_eq!(first.types_mut().find_by_name("int"), Some(TypeId::INT));
}

#[test]
fn global_frame_survives_excess_pops() {
    let mut session = Session::new();

    // Nothing above the global frame: the pop is a no-op.
    assert!(session.pop_local_scope().is_none());
    assert!(session.pop_local_scope().is_none());

    // Declarations still land in the global scope afterwards.
    session.declare_global_variable("x", "int");
    session.declare_struct("Point", &[("x".to_string(), "int".to_string())]);
    let global = session.scopes().base().unwrap();
    assert!(global.lookup("x").is_some());
    assert!(global.lookup("Point").is_some());

    // A pushed local scope still pops normally.
    session.push_local_scope(Scope::new());
    assert!(session.pop_local_scope().is_some());
    assert!(session.pop_local_scope().is_none());
}

#[test]
fn unknown_type_names_become_placeholders() {
    let mut session = Session::new();
    session.declare_global_variable("w", "word");

    let global = session.scopes().base().unwrap();
    let sym = global.lookup("w").unwrap();
    assert_eq!(session.types().name_of(sym.type_id), "word");
    assert_eq!(session.types().size_of(sym.type_id), 0);
    // Zero-sized placeholder: the offset counter does not move.
    assert_eq!(global.current_offset(), 0);
}
