/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Pointer-identity key for registered topic listeners.

use crate::topic::TopicListener;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identifies a listener by the allocation behind its `Arc`.
///
/// Two keys are equal only when built from clones of the same `Arc`, so
/// listeners with identical state stay distinct.
#[derive(Clone)]
pub(crate) struct ListenerIdentityKey {
    listener: Arc<dyn TopicListener>,
}

impl ListenerIdentityKey {
    pub(crate) fn new(listener: Arc<dyn TopicListener>) -> Self {
        Self { listener }
    }

    pub(crate) fn listener(&self) -> &Arc<dyn TopicListener> {
        &self.listener
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.listener) as *const ()
    }
}

impl Hash for ListenerIdentityKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl PartialEq for ListenerIdentityKey {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for ListenerIdentityKey {}

impl Debug for ListenerIdentityKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerIdentityKey")
            .field("addr", &self.addr())
            .finish()
    }
}
