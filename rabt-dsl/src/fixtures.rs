//! Components shared by the unit tests.

use std::sync::Arc;

use rabt_container::{Component, Param, Shape, capability};

pub trait IFoo: Send + Sync {}
pub trait IBar: Send + Sync {
    fn foo(&self) -> Arc<dyn IFoo>;
}

capability!(IFoo, IBar);

pub struct Foo;

impl IFoo for Foo {}

impl Component for Foo {
    fn shape() -> Shape<Self> {
        Shape::new()
            .constructor([], |_| Ok(Foo))
            .provides(|foo: Arc<Foo>| -> Arc<dyn IFoo> { foo })
    }
}

pub struct Bar {
    foo: Arc<dyn IFoo>,
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
