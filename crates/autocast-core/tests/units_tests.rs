//! Time units declared through `Castable` tables, with arithmetic done by
//! casting the right-hand operand into the left-hand unit.
//!
//! `Seconds` is the hub: every unit converts to and from it, except `Weeks`,
//! which only knows `Days`, and `Fortnights`, which only knows `Weeks`.

use std::cmp::Ordering;

use autocast_core::{CastError, CastRegistry, Castable, Caster, ConversionTable, TypeKey};

macro_rules! time_unit {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq)]
        struct $name(f64);

        #[allow(dead_code)]
        impl $name {
            fn add<T: Send + 'static>(self, caster: &Caster, other: T) -> Result<Self, CastError> {
                let other: $name = caster.cast(other)?;
                Ok($name(self.0 + other.0))
            }

            fn subtract<T: Send + 'static>(
                self,
                caster: &Caster,
                other: T,
            ) -> Result<Self, CastError> {
                let other: $name = caster.cast(other)?;
                Ok($name(self.0 - other.0))
            }

            fn compare_to<T: Send + 'static>(
                self,
                caster: &Caster,
                other: T,
            ) -> Result<Option<Ordering>, CastError> {
                let other: $name = caster.cast(other)?;
                Ok(self.0.partial_cmp(&other.0))
            }
        }
    };
}

time_unit!(Seconds);
time_unit!(Minutes);
time_unit!(Hours);
time_unit!(Days);
time_unit!(Weeks);
time_unit!(Fortnights);

impl Castable for Seconds {
    fn conversions(_: &mut ConversionTable<Self>) {}
}

impl Castable for Minutes {
    fn conversions(table: &mut ConversionTable<Self>) {
        table
            .to(|m: Minutes| Seconds(m.0 * 60.0))
            .from(|s: Seconds| Minutes(s.0 / 60.0));
    }
}

impl Castable for Hours {
    fn conversions(table: &mut ConversionTable<Self>) {
        table
            .to(|h: Hours| Seconds(h.0 * 3600.0))
            .from(|s: Seconds| Hours(s.0 / 3600.0));
    }
}

impl Castable for Days {
    fn conversions(table: &mut ConversionTable<Self>) {
        table
            .to(|d: Days| Seconds(d.0 * 86400.0))
            .from(|s: Seconds| Days(s.0 / 86400.0));
    }
}

impl Castable for Weeks {
    fn conversions(table: &mut ConversionTable<Self>) {
        table
            .to(|w: Weeks| Days(w.0 * 7.0))
            .from(|d: Days| Weeks(d.0 / 7.0));
    }
}

impl Castable for Fortnights {
    fn conversions(table: &mut ConversionTable<Self>) {
        table.to(|f: Fortnights| Weeks(f.0 * 2.0));
    }
}

#[allow(dead_code)]
#[derive(Debug)]
struct Ufo;

fn caster() -> Caster {
    let mut registry = CastRegistry::new();
    registry.register_type::<Seconds>().unwrap();
    registry.register_type::<Minutes>().unwrap();
    registry.register_type::<Hours>().unwrap();
    registry.register_type::<Days>().unwrap();
    registry.register_type::<Weeks>().unwrap();
    registry.register_type::<Fortnights>().unwrap();
    registry.seal()
}

#[test]
fn test_direct_unit_casts() {
    let caster = caster();
    assert_eq!(caster.cast::<_, Seconds>(Minutes(1.0)).unwrap(), Seconds(60.0));
    assert_eq!(caster.cast::<_, Minutes>(Seconds(90.0)).unwrap(), Minutes(1.5));
}

#[test]
fn test_indirect_unit_casts() {
    let caster = caster();
    assert_eq!(caster.cast::<_, Hours>(Days(2.0)).unwrap(), Hours(48.0));
    assert_eq!(caster.cast::<_, Days>(Fortnights(2.0)).unwrap(), Days(28.0));
    assert_eq!(
        caster.path_of::<Fortnights, Hours>().unwrap(),
        vec![
            TypeKey::of::<Weeks>(),
            TypeKey::of::<Days>(),
            TypeKey::of::<Seconds>(),
            TypeKey::of::<Hours>(),
        ]
    );
}

#[test]
fn test_fortnights_are_one_way() {
    let caster = caster();
    assert!(matches!(
        caster.cast::<_, Fortnights>(Weeks(2.0)),
        Err(CastError::NoPathFound { .. })
    ));
}

#[test]
fn test_unrelated_type() {
    let caster = caster();
    let err = caster.cast::<_, Ufo>(Hours(2.0)).unwrap_err();
    assert!(matches!(err, CastError::NoPathFound { .. }));
}

#[test]
fn test_named_arithmetic() {
    let caster = caster();
    let total = Minutes(30.0).add(&caster, Hours(1.0)).unwrap();
    assert_eq!(total, Minutes(90.0));

    let rest = Minutes(30.0).subtract(&caster, Seconds(600.0)).unwrap();
    assert_eq!(rest, Minutes(20.0));
}

#[test]
fn test_named_comparison() {
    let caster = caster();
    assert_eq!(
        Minutes(30.0).compare_to(&caster, Hours(1.0)).unwrap(),
        Some(Ordering::Less)
    );
    assert_eq!(
        Minutes(60.0).compare_to(&caster, Hours(1.0)).unwrap(),
        Some(Ordering::Equal)
    );
    assert_eq!(
        Fortnights(2.0).compare_to(&caster, Fortnights(1.0)).unwrap(),
        Some(Ordering::Greater)
    );
    assert!(Hours(200.0).compare_to(&caster, Fortnights(2.0)).unwrap() == Some(Ordering::Less));
}
