//! Components and helpers shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use rabt::prelude::*;

/// Installs a test-writer subscriber once; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

pub trait IFoo: Send + Sync {
    fn counter(&self) -> i32;
}

pub trait IBar: Send + Sync {
    fn foo(&self) -> Arc<dyn IFoo>;
}

pub trait IBaz: Send + Sync {
    fn value(&self) -> i32;
    fn message(&self) -> &str;
}

pub trait IWarrior: Send + Sync {
    fn name(&self) -> &str;
    fn power(&self) -> i32;
}

pub trait IInvoice: Send + Sync {}
pub trait IProduct: Send + Sync {}

pub trait IStore1: Send + Sync {}
pub trait IStore2: Send + Sync {}
pub trait IStore3: Send + Sync {}
pub trait IStore4: Send + Sync {}

pub trait IVehicle: Send + Sync {
    fn plate(&self) -> &str;
    fn miles(&self) -> u32;
}

capability!(
    IFoo, IBar, IBaz, IWarrior, IInvoice, IProduct, IStore1, IStore2, IStore3, IStore4, IVehicle
);

rabt::dsl::catalog!(dyn IFoo, Foo, dyn IBar, Bar, dyn IBaz, Baz);

#[derive(Component)]
#[component(provides = "dyn IFoo")]
pub struct Foo {
    #[component(property)]
    pub counter: i32,
}

impl IFoo for Foo {
    fn counter(&self) -> i32 {
        self.counter
    }
}

#[derive(Component)]
#[component(provides = "dyn IBar")]
pub struct Bar {
    pub foo: Arc<dyn IFoo>,
}

impl IBar for Bar {
    fn foo(&self) -> Arc<dyn IFoo> {
        self.foo.clone()
    }
}

#[derive(Component)]
#[component(provides = "dyn IBaz")]
pub struct Baz {
    pub foo: Arc<dyn IFoo>,
    pub value: i32,
    #[component(property)]
    pub message: String,
}

impl IBaz for Baz {
    fn value(&self) -> i32 {
        self.value
    }

    fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Component)]
#[component(provides = "dyn IWarrior")]
pub struct Warrior {
    pub name: String,
    pub power: i32,
}

impl IWarrior for Warrior {
    fn name(&self) -> &str {
        &self.name
    }

    fn power(&self) -> i32 {
        self.power
    }
}

#[derive(Component)]
#[component(provides = "dyn IInvoice")]
pub struct Invoice {
    pub product: Arc<dyn IProduct>,
}

impl IInvoice for Invoice {}

#[derive(Component)]
#[component(provides = "dyn IProduct")]
pub struct Product {
    pub invoice: Arc<dyn IInvoice>,
}

impl IProduct for Product {}

#[derive(Component)]
#[component(provides = "dyn IStore1")]
pub struct Store1 {
    pub next: Arc<dyn IStore4>,
}

impl IStore1 for Store1 {}

#[derive(Component)]
#[component(provides = "dyn IStore2")]
pub struct Store2 {
    pub next: Arc<dyn IStore1>,
}

impl IStore2 for Store2 {}

#[derive(Component)]
#[component(provides = "dyn IStore3")]
pub struct Store3 {
    pub next: Arc<dyn IStore2>,
}

impl IStore3 for Store3 {}

#[derive(Component)]
#[component(provides = "dyn IStore4")]
pub struct Store4 {
    pub next: Arc<dyn IStore3>,
}

impl IStore4 for Store4 {}

/// Concrete dependency, resolved without a binding.
#[derive(Component)]
pub struct Engine {
    #[component(skip)]
    pub miles: u32,
}

#[derive(Component)]
#[component(provides = "dyn IVehicle")]
pub struct Car {
    pub engine: Arc<Engine>,
    #[component(value)]
    pub plate: Arc<str>,
}

impl IVehicle for Car {
    fn plate(&self) -> &str {
        &self.plate
    }

    fn miles(&self) -> u32 {
        self.engine.miles
    }
}
