// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Stand-in objects for interface-typed parameters.

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::model::{Instance, InvokeError, MemberInfo, Value};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A behaviorless implementation of an interface.
///
/// Every declared member answers with the neutral value of its return type;
/// anything else answers `Null`. Only identity matters: an accessor that
/// stores a stand-in must return that very object.
#[derive(Debug)]
pub struct StandIn {
    interface: String,
    id: u64,
    members: Vec<MemberInfo>,
}

impl StandIn {
    pub fn new(interface: impl Into<String>, members: Vec<MemberInfo>) -> Self {
        Self {
            interface: interface.into(),
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            members,
        }
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Instance for StandIn {
    fn type_name(&self) -> &str {
        &self.interface
    }

    fn invoke(&mut self, member: &str, _args: &[Value]) -> Result<Value, InvokeError> {
        Ok(self
            .members
            .iter()
            .find(|m| m.name == member)
            .map_or(Value::Null, |m| Value::neutral(&m.returns)))
    }

    fn render(&self) -> String {
        format!("stand-in {}#{}", self.interface, self.id)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Is this value a stand-in object?
pub fn is_stand_in(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|object| object.try_borrow().ok().map(|i| i.as_any().is::<StandIn>()))
        .unwrap_or(false)
}
