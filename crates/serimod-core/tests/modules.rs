use rstest::rstest;
use serimod_core::typed::{ContextualResolver, PolymorphicResolver};
use serimod_core::{
    ModuleBuilder, RegistryError, SerialModule, SerialName, SerialRegistry, SerializerHandle,
    TypeKey, serializers_module, serializers_module_from_map, serializers_module_of,
};

struct A;
struct B;

impl SerialName for A {
    const SERIAL_NAME: &'static str = "test.A";
}

impl SerialName for B {
    const SERIAL_NAME: &'static str = "test.B";
}

struct ASerializer;
struct BSerializer;

fn a_serializer() -> SerializerHandle {
    SerializerHandle::new(ASerializer)
}

fn b_serializer() -> SerializerHandle {
    SerializerHandle::new(BSerializer)
}

fn assert_module_has(
    module: &SerialModule,
    a: Option<&SerializerHandle>,
    b: Option<&SerializerHandle>,
) {
    assert_eq!(module.contextual(&TypeKey::of::<A>()).as_ref(), a);
    assert_eq!(module.contextual(&TypeKey::of::<B>()).as_ref(), b);
}

#[test]
fn singleton_module() {
    let a = a_serializer();
    let module = serializers_module_of(TypeKey::of::<A>(), a.clone()).unwrap();
    assert_module_has(&module, Some(&a), None);
}

#[test]
fn map_module_and_composition() {
    let a = a_serializer();
    let b = b_serializer();

    let m1 = serializers_module_of(TypeKey::of::<A>(), a.clone()).unwrap();
    let m2 = serializers_module_from_map([(TypeKey::of::<B>(), b.clone())]).unwrap();

    assert_module_has(&m1, Some(&a), None);
    assert_module_has(&m2, None, Some(&b));
    assert_module_has(&(&m1 + &m2), Some(&a), Some(&b));
    assert_module_has(&(&m2 + &m1), Some(&a), Some(&b));

    let both = serializers_module_from_map([
        (TypeKey::of::<A>(), a.clone()),
        (TypeKey::of::<B>(), b.clone()),
    ])
    .unwrap();
    assert_module_has(&both, Some(&a), Some(&b));
}

#[test]
fn composite_built_up_with_add_assign() {
    let a = a_serializer();
    let b = b_serializer();
    let module_a = serializers_module_of(TypeKey::of::<A>(), a.clone()).unwrap();
    let module_b = serializers_module_of(TypeKey::of::<B>(), b.clone()).unwrap();

    let mut composite = SerialModule::empty();
    assert_module_has(&composite, None, None);
    composite += module_a;
    assert_module_has(&composite, Some(&a), None);
    composite += module_b;
    assert_module_has(&composite, Some(&a), Some(&b));
}

#[test]
fn overwrite_in_one_builder_fails() {
    let a = a_serializer();
    let result = serializers_module(|m| {
        m.contextual_of::<A>(a.clone())?;
        m.contextual_of::<A>(a.clone())?;
        Ok(())
    });
    assert!(matches!(
        result,
        Err(RegistryError::ContextualAlreadyRegistered { key }) if key == TypeKey::of::<A>()
    ));
}

#[test]
fn plus_is_left_biased() {
    let a = a_serializer();
    let b = b_serializer();
    let incorrect = serializers_module_from_map([(TypeKey::of::<A>(), b.clone())]).unwrap();
    let correct = serializers_module_from_map([(TypeKey::of::<A>(), a.clone())]).unwrap();

    assert_module_has(&correct, Some(&a), None);
    assert_module_has(&(&correct + &incorrect), Some(&a), None);
    assert_module_has(&(&incorrect + &correct), Some(&b), None);
}

#[rstest]
#[case::empty_on_the_left(true)]
#[case::empty_on_the_right(false)]
fn empty_module_is_the_identity(#[case] empty_first: bool) {
    let a = a_serializer();
    let shape = TypeKey::tag("Shape");
    let circle = TypeKey::tag("Circle");
    let r = serializers_module(|m| {
        m.contextual_of::<A>(a.clone())?;
        m.polymorphic(shape.clone(), None, |scope| {
            scope.add_subclass(circle.clone(), a.clone());
        })?;
        Ok(())
    })
    .unwrap();

    let composed = if empty_first {
        SerialModule::empty() + r.clone()
    } else {
        r.clone() + SerialModule::empty()
    };

    for key in [TypeKey::of::<A>(), TypeKey::of::<B>(), circle.clone()] {
        assert_eq!(composed.contextual(&key), r.contextual(&key));
        assert_eq!(composed.resolve_by_value(&shape, &key), r.resolve_by_value(&shape, &key));
    }
    for name in ["Circle", "Square", "test.A"] {
        assert_eq!(composed.resolve_by_name(&shape, name), r.resolve_by_name(&shape, name));
    }
}

#[test]
fn composition_is_associative() {
    let handles: Vec<SerializerHandle> = (0..3).map(SerializerHandle::new).collect();
    let modules: Vec<SerialModule> = handles
        .iter()
        .map(|h| serializers_module_of(TypeKey::tag("K"), h.clone()).unwrap())
        .collect();
    let (a, b, c) = (&modules[0], &modules[1], &modules[2]);

    let left = &(a + b) + c;
    let right = a + &(b + c);

    let left_flat = left.flattened();
    let right_flat = right.flattened();
    assert_eq!(left_flat.len(), 3);
    assert!(left_flat.iter().zip(&right_flat).all(|(l, r)| l.ptr_eq(r)));

    assert_eq!(left.contextual(&TypeKey::tag("K")), Some(handles[0].clone()));
    assert_eq!(right.contextual(&TypeKey::tag("K")), Some(handles[0].clone()));
    assert_eq!(
        (c + &(b + a)).contextual(&TypeKey::tag("K")),
        Some(handles[2].clone())
    );
}

#[test]
fn repeated_composition_stays_flat() {
    let module = serializers_module_of(TypeKey::tag("K"), SerializerHandle::new(())).unwrap();
    let mut composite = SerialModule::empty();
    for _ in 0..10 {
        composite = &composite + &(&module + &module);
    }
    assert_eq!(composite.flattened().len(), 21);
    assert!(
        composite
            .flattened()
            .iter()
            .all(|m| m.constituents().is_none())
    );
}

#[test]
fn change_base_registers_subclasses_under_the_new_base_only() {
    let (h1, h2) = (SerializerHandle::new("S1"), SerializerHandle::new("S2"));
    let (s1, s2) = (TypeKey::tag("S1"), TypeKey::tag("S2"));
    let old_base = TypeKey::tag("OldBase");
    let new_base = TypeKey::tag("NewBase");

    let module = serializers_module(|m| {
        let mut scope = serimod_core::PolymorphicScopeBuilder::new(old_base.clone(), None);
        scope.add_subclass(s1.clone(), h1.clone()).add_subclass(s2.clone(), h2.clone());
        scope.change_base(new_base.clone(), None).commit_to(m)
    })
    .unwrap();

    assert_eq!(module.resolve_by_value(&new_base, &s1), Some(h1));
    assert_eq!(module.resolve_by_value(&new_base, &s2), Some(h2));
    assert_eq!(module.resolve_by_value(&new_base, &old_base), None);
    assert_eq!(module.resolve_by_value(&old_base, &s1), None);
}

#[test]
fn one_hierarchy_under_two_bases() {
    // interface I; abstract class Base : I; class Impl : Base
    let base_handle = SerializerHandle::new("Base");
    let impl_handle = SerializerHandle::new("Impl");
    let iface = TypeKey::tag("I");
    let base = TypeKey::tag("Base");
    let implementation = TypeKey::tag("Impl").with_serial_name("impl.v1");

    let module = serializers_module(|m| {
        m.polymorphic_many(
            [(base.clone(), Some(base_handle.clone())), (iface.clone(), None)],
            |scope| {
                scope.add_subclass(implementation.clone(), impl_handle.clone());
            },
        )?;
        Ok(())
    })
    .unwrap();

    for scope in [&iface, &base] {
        let resolver = PolymorphicResolver::new(scope.clone(), module.clone());
        let target = resolver.for_encode(&implementation).unwrap();
        assert_eq!(target.discriminator, "impl.v1");
        assert_eq!(resolver.for_decode("impl.v1").unwrap(), impl_handle);
        assert_eq!(resolver.for_decode("Base").unwrap(), base_handle);
    }
}

#[test]
fn failed_build_produces_no_module() {
    let result = serializers_module(|m| {
        m.contextual(TypeKey::tag("X"), a_serializer())?;
        m.polymorphic(TypeKey::tag("Shape"), None, |scope| {
            scope
                .add_subclass(TypeKey::tag("Circle"), a_serializer())
                .add_subclass(TypeKey::tag("Disc").with_serial_name("Circle"), b_serializer());
        })?;
        Ok(())
    });
    assert!(matches!(
        result,
        Err(RegistryError::DiscriminatorAlreadyRegistered { name, .. }) if name == "Circle"
    ));
}

#[test]
fn separate_builds_may_register_the_same_key() {
    let first = SerializerHandle::new("first");
    let mut one = ModuleBuilder::new();
    one.contextual(TypeKey::tag("K"), first.clone()).unwrap();
    let mut two = ModuleBuilder::new();
    two.contextual(TypeKey::tag("K"), SerializerHandle::new("second")).unwrap();

    let sum = SerialModule::from(one.build().unwrap()) + SerialModule::from(two.build().unwrap());
    assert_eq!(sum.contextual(&TypeKey::tag("K")), Some(first));
}

#[test]
fn contextual_resolver_falls_back_to_defaults() {
    let a = a_serializer();
    let default_b = b_serializer();
    let module = serializers_module_of(TypeKey::of::<A>(), a.clone()).unwrap();
    let resolver = ContextualResolver::new(module, {
        let default_b = default_b.clone();
        move |key: &TypeKey| key.is_type::<B>().then(|| default_b.clone())
    });

    assert_eq!(resolver.for_encode(&TypeKey::of::<A>()).unwrap(), a);
    assert_eq!(resolver.for_decode(&TypeKey::of::<B>()).unwrap(), default_b);
    assert!(resolver.for_decode(&TypeKey::tag("C")).is_err());
}
