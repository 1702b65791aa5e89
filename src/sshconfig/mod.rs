// Copyright 2026 The devssh Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Lossless SSH client config parsing and serialization.
//!
//! The reconciler owns some host blocks and must leave everything else
//! untouched down to the byte, so the model here is a tagged sequence of
//! nodes that each keep their exact source text. `serialize(parse(x)) == x`
//! holds for every input that parses; the property is exercised in the
//! parser tests and leaned on by the pruning pipeline.

pub mod error;
pub mod parser;
pub mod pattern;
pub mod types;

pub use error::ParseError;
pub use parser::parse;
pub use types::{ConfigNode, Directive, HostBlock, ManagedConfig};
