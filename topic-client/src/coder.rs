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

//! JSON encoding of bus messages.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoderError {
    #[error("cannot encode message")]
    Encode(#[source] serde_json::Error),
    #[error("cannot decode message")]
    Decode(#[source] serde_json::Error),
}

pub fn encode<T: Serialize + ?Sized>(message: &T) -> Result<String, CoderError> {
    serde_json::to_string(message).map_err(CoderError::Encode)
}

pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, CoderError> {
    serde_json::from_str(text).map_err(CoderError::Decode)
}
