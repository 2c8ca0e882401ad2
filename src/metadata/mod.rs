// Copyright (C) 2025 The Telnum Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The metadata model driving parsing, validation and formatting, together
//! with its loader. Region entries are built lazily from the nested
//! document supplied at construction time and memoized for the lifetime of
//! the process.

mod document;
mod loader;
mod model;

pub use loader::MetadataError;
pub(crate) use loader::MetadataLoader;
pub(crate) use model::DescriptorPattern;
pub use model::{NumberDescriptor, NumberFormat, RegionMetadata};
