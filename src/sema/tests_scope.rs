use super::scope::{Scope, Symbol, SymbolCategory};
use super::type_registry::TypeRegistry;
use super::types::TypeId;

#[test]
fn offsets_grow_by_symbol_size() {
    let registry = TypeRegistry::new();
    let mut scope = Scope::new();

    assert_eq!(scope.current_offset(), 0);
    scope.insert("a", Symbol::variable(scope.current_offset(), TypeId::INT), &registry);
    assert_eq!(scope.current_offset(), 4);
    scope.insert("b", Symbol::variable(scope.current_offset(), TypeId::FLOAT), &registry);
    assert_eq!(scope.current_offset(), 8);

    assert_eq!(scope.lookup("a").unwrap().offset, 0);
    assert_eq!(scope.lookup("b").unwrap().offset, 4);
}

#[test]
fn array_typed_symbol_advances_by_the_array_size() {
    let mut registry = TypeRegistry::new();
    let array = registry.create_array("int", &[3, 4]);

    let mut scope = Scope::new();
    scope.insert("m", Symbol::variable(0, array), &registry);
    assert_eq!(scope.current_offset(), 48);
}

#[test]
fn overloads_coexist_under_mangled_keys() {
    let registry = TypeRegistry::new();
    let mut scope = Scope::new();

    scope.insert_function("f", TypeId::INT, vec![TypeId::INT], &registry);
    scope.insert_function("f", TypeId::INT, vec![TypeId::FLOAT], &registry);

    let by_int = scope.lookup(&Scope::overload_key("f", &[TypeId::INT])).unwrap();
    let by_float = scope.lookup(&Scope::overload_key("f", &[TypeId::FLOAT])).unwrap();

    assert_eq!(by_int.category, SymbolCategory::Function);
    assert_eq!(by_int.param_type_ids, vec![TypeId::INT]);
    assert_eq!(by_float.param_type_ids, vec![TypeId::FLOAT]);
    assert_eq!(scope.len(), 2);

    // The bare name is not bound; only the mangled keys are.
    assert!(scope.lookup("f").is_none());
}

#[test]
fn overload_keys_append_parameter_ids() {
    assert_eq!(Scope::overload_key("f", &[TypeId::INT]), "f_0");
    assert_eq!(Scope::overload_key("f", &[TypeId::FLOAT]), "f_1");
    assert_eq!(Scope::overload_key("g", &[]), "g");
    assert_eq!(
        Scope::overload_key("h", &[TypeId::INT, TypeId::FLOAT]),
        "h_0_1"
    );
}

#[test]
fn functions_count_as_one_pointer_sized_unit() {
    let registry = TypeRegistry::new();
    let mut scope = Scope::new();

    scope.insert_function("f", TypeId::VOID, vec![], &registry);
    assert_eq!(scope.current_offset(), 4);
    scope.insert_function("g", TypeId::INT, vec![TypeId::INT], &registry);
    assert_eq!(scope.current_offset(), 8);
    assert_eq!(scope.lookup("g_0").unwrap().offset, 4);
}

#[test]
fn struct_bindings_do_not_consume_storage() {
    let registry = TypeRegistry::new();
    let mut scope = Scope::new();

    scope.insert("a", Symbol::variable(0, TypeId::INT), &registry);
    scope.insert_struct("Point", TypeId::new(8));

    assert_eq!(scope.current_offset(), 4);
    let sym = scope.lookup("Point").unwrap();
    assert_eq!(sym.category, SymbolCategory::Struct);
    assert_eq!(sym.offset, 4);
}

#[test]
fn duplicate_names_overwrite_without_error() {
    let registry = TypeRegistry::new();
    let mut scope = Scope::new();

    scope.insert("x", Symbol::variable(0, TypeId::INT), &registry);
    scope.insert("x", Symbol::variable(4, TypeId::FLOAT), &registry);

    assert_eq!(scope.len(), 1);
    assert_eq!(scope.lookup("x").unwrap().type_id, TypeId::FLOAT);
    // The offset counter never rewinds, even when a binding is replaced.
    assert_eq!(scope.current_offset(), 8);
}

#[test]
fn lookup_falls_through_to_the_parent_chain() {
    let registry = TypeRegistry::new();

    let mut outer = Scope::new();
    outer.insert("shared", Symbol::variable(0, TypeId::INT), &registry);

    let mut inner = Scope::with_parent(outer);
    inner.insert("own", Symbol::variable(0, TypeId::FLOAT), &registry);

    assert!(inner.lookup("own").is_some());
    assert!(inner.lookup("shared").is_some());
    assert!(inner.lookup_local("shared").is_none());
    assert!(inner.lookup("missing").is_none());
}

#[test]
fn insertion_order_is_preserved() {
    let registry = TypeRegistry::new();
    let mut scope = Scope::new();

    for name in ["c", "a", "b"] {
        scope.insert(name, Symbol::variable(scope.current_offset(), TypeId::INT), &registry);
    }

    let names: Vec<&str> = scope.symbols().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}
