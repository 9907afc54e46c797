//! Components shared by the unit tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::RabtError;
use crate::key::TypeKey;
use crate::shape::{Component, Param, Shape};

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

pub trait ILamp: Send + Sync {
    fn describe(&self) -> String;
}

pub trait IInvoice: Send + Sync {}
pub trait IProduct: Send + Sync {}

pub trait IStore1: Send + Sync {}
pub trait IStore2: Send + Sync {}
pub trait IStore3: Send + Sync {}
pub trait IStore4: Send + Sync {}

crate::capability!(
    IFoo, IBar, IBaz, IWarrior, ILamp, IInvoice, IProduct, IStore1, IStore2, IStore3, IStore4,
);

#[derive(Debug, Default)]
pub struct Foo {
    pub counter: i32,
}

impl IFoo for Foo {
    fn counter(&self) -> i32 {
        self.counter
    }
}

impl Component for Foo {
    fn shape() -> Shape<Self> {
        Shape::new()
            .constructor([], |_| Ok(Foo::default()))
            .property("counter", |foo: &mut Foo, counter: i32| foo.counter = counter)
            .provides(|foo: Arc<Foo>| -> Arc<dyn IFoo> { foo })
    }
}

pub struct Bar {
    pub foo: Arc<dyn IFoo>,
}

impl IBar for Bar {
    fn foo(&self) -> Arc<dyn IFoo> {
        self.foo.clone()
    }
}

impl Component for Bar {
    fn shape() -> Shape<Self> {
        Shape::new()
            .constructor([Param::object::<dyn IFoo>("foo")], |args| {
                Ok(Bar {
                    foo: args.object("foo")?,
                })
            })
            .provides(|bar: Arc<Bar>| -> Arc<dyn IBar> { bar })
    }
}

pub struct Baz {
    pub foo: Arc<dyn IFoo>,
    pub value: i32,
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

impl Component for Baz {
    fn shape() -> Shape<Self> {
        Shape::new()
            .constructor(
                [
                    Param::object::<dyn IFoo>("foo"),
                    Param::value::<i32>("value"),
                ],
                |args| {
                    Ok(Baz {
                        foo: args.object("foo")?,
                        value: args.value("value")?,
                        message: String::new(),
                    })
                },
            )
            .property("message", |baz: &mut Baz, message: String| baz.message = message)
            .provides(|baz: Arc<Baz>| -> Arc<dyn IBaz> { baz })
    }
}

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

impl Component for Warrior {
    fn shape() -> Shape<Self> {
        Shape::new()
            .constructor(
                [Param::value::<String>("name"), Param::value::<i32>("power")],
                |args| {
                    Ok(Warrior {
                        name: args.value("name")?,
                        power: args.value("power")?,
                    })
                },
            )
            .provides(|warrior: Arc<Warrior>| -> Arc<dyn IWarrior> { warrior })
    }
}

/// Several constructors; the single-parameter `watts` one is picked.
pub struct Lamp {
    pub watts: u32,
    pub color: String,
}

impl ILamp for Lamp {
    fn describe(&self) -> String {
        format!("{}W {}", self.watts, self.color)
    }
}

impl Component for Lamp {
    fn shape() -> Shape<Self> {
        Shape::new()
            .constructor(
                [Param::value::<u32>("watts"), Param::value::<String>("color")],
                |args| {
                    Ok(Lamp {
                        watts: args.value("watts")?,
                        color: args.value("color")?,
                    })
                },
            )
            .constructor([Param::value::<u32>("watts")], |args| {
                Ok(Lamp {
                    watts: args.value("watts")?,
                    color: String::from("white"),
                })
            })
            .constructor([Param::value::<u32>("lumens")], |args| {
                Ok(Lamp {
                    watts: args.value::<u32>("lumens")? / 10,
                    color: String::from("warm"),
                })
            })
            .provides(|lamp: Arc<Lamp>| -> Arc<dyn ILamp> { lamp })
    }
}

pub struct Invoice {
    pub product: Arc<dyn IProduct>,
}

impl IInvoice for Invoice {}

impl Component for Invoice {
    fn shape() -> Shape<Self> {
        Shape::new()
            .constructor([Param::object::<dyn IProduct>("product")], |args| {
                Ok(Invoice {
                    product: args.object("product")?,
                })
            })
            .provides(|invoice: Arc<Invoice>| -> Arc<dyn IInvoice> { invoice })
    }
}

pub struct Product {
    pub invoice: Arc<dyn IInvoice>,
}

impl IProduct for Product {}

impl Component for Product {
    fn shape() -> Shape<Self> {
        Shape::new()
            .constructor([Param::object::<dyn IInvoice>("invoice")], |args| {
                Ok(Product {
                    invoice: args.object("invoice")?,
                })
            })
            .provides(|product: Arc<Product>| -> Arc<dyn IProduct> { product })
    }
}

macro_rules! store {
    ($name:ident: $provides:ident <- $needs:ident) => {
        pub struct $name {
            pub next: Arc<dyn $needs>,
        }

        impl $provides for $name {}

        impl Component for $name {
            fn shape() -> Shape<Self> {
                Shape::new()
                    .constructor([Param::object::<dyn $needs>("next")], |args| {
                        Ok($name {
                            next: args.object("next")?,
                        })
                    })
                    .provides(|store: Arc<$name>| -> Arc<dyn $provides> { store })
            }
        }
    };
}

store!(Store1: IStore1 <- IStore4);
store!(Store2: IStore2 <- IStore1);
store!(Store3: IStore3 <- IStore2);
store!(Store4: IStore4 <- IStore3);

/// Depends on itself.
pub struct Node {
    pub next: Arc<Node>,
}

impl Component for Node {
    fn shape() -> Shape<Self> {
        Shape::new().constructor([Param::object::<Node>("next")], |args| {
            Ok(Node {
                next: args.object("next")?,
            })
        })
    }
}

/// Declares no constructor.
pub struct Ghost;

impl Component for Ghost {
    fn shape() -> Shape<Self> {
        Shape::new()
    }
}

/// Its only constructor always fails.
pub struct Faulty;

impl Component for Faulty {
    fn shape() -> Shape<Self> {
        Shape::new().constructor([], |_| {
            Err(RabtError::construction(TypeKey::of::<Faulty>(), "out of fuel"))
        })
    }
}

/// Times [`Tally`] has been built. Only one test may construct it.
pub static TALLY_BUILDS: AtomicUsize = AtomicUsize::new(0);

/// Counts its own constructions.
pub struct Tally;

impl Component for Tally {
    fn shape() -> Shape<Self> {
        Shape::new().constructor([], |_| {
            TALLY_BUILDS.fetch_add(1, Ordering::SeqCst);
            Ok(Tally)
        })
    }
}
