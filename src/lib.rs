//! Typed, validated configuration from environment variables and `.env`
//! files. Declare a schema, point at your sources, and go.
//!
//! Envfig reads raw `KEY=value` pairs from a `.env` file and the process
//! environment, coerces each declared key to its kind, validates it, and
//! hands back a frozen [`Config`].
//!
//! ```ignore
//! let schema = Schema::new()
//!     .field("DATABASE_URL", SchemaEntry::required())
//!     .field("PORT", 3000)
//!     .field("LOG_LEVEL", FieldDescriptor::string()
//!         .default("info")
//!         .choices(["debug", "info", "warn", "error"]));
//!
//! let config = Envfig::builder().schema(schema).load()?;
//! let port = config.get_f64("PORT");
//! ```
//!
//! That single call finds `.env` in the working directory, overlays the
//! process environment, fills in defaults, and fails on the first invalid
//! field with an error that names it.
//!
//! # Schema entries
//!
//! Each key in a [`Schema`] maps to a [`SchemaEntry`] in one of three shapes,
//! all normalized to a [`FieldDescriptor`] before use:
//!
//! - **Literal**: `"localhost"`, `3000`, `true`. The literal's kind is the
//!   field's kind and the literal is its default.
//! - **Required shorthand**: [`SchemaEntry::required()`] or
//!   [`SchemaEntry::one_of()`]. A required string, or a required field whose
//!   kind follows the first choice.
//! - **Descriptor**: a full [`FieldDescriptor`] with an explicit kind,
//!   default, choices, description, and kind constraints.
//!
//! Schemas can also be read from JSON or TOML documents
//! ([`Schema::from_json_str`], [`Schema::from_toml_str`]), where descriptors
//! are tables with a `kind` (or `type`) key.
//!
//! # Kinds and coercion
//!
//! | Kind | Accepted raw values |
//! |------|---------------------|
//! | `string` | anything, as is |
//! | `number` | decimal, `0x`/`0o`/`0b`, exponent, `Infinity` |
//! | `boolean` | `true` / `false`, in any case |
//! | `object` | a JSON document |
//!
//! An absent key takes its default; an absent optional key without a default
//! is left out of the result.
//!
//! # Validation
//!
//! After coercion, a value must match one of its `choices` (if any), then
//! pass the constraints of its kind: `min_length`/`max_length`/`pattern` for
//! strings, inclusive `min`/`max` for numbers, and finally a custom
//! [`Validator`]. The first failing field aborts the load.
//!
//! # Schema-free loading
//!
//! Without a schema, one is inferred from the `.env` file: quoted values are
//! strings, `true`/`false` are booleans, numeric literals are numbers, and
//! every present key is required. See [`infer_kind`] and [`infer_schema`].
//! The process environment is not inferred over.
//!
//! # Sources and precedence
//!
//! ```text
//! Schema defaults       FieldDescriptor::default / literal entries
//!        ↑ overridden by
//! .env file             first match from the highest-priority search path
//!        ↑ overridden by
//! Environment vars      optionally filtered by .env_prefix()
//! ```
//!
//! [`search_paths()`](EnvfigBuilder::search_paths) accepts [`SearchPath`]
//! variants in **priority-ascending** order (last = highest). The default is
//! `[Cwd]`. `Ancestors(boundary)` walks up from the working directory, so the
//! nearest `.env` wins; the [`Boundary`] controls how far to walk. Missing
//! files are skipped silently.
//!
//! # The engine
//!
//! [`load`] is the pure core: a [`RawEnv`] and a [`Schema`] in, a [`Config`]
//! out, with no I/O. [`Engine`] is the same pipeline split into steps:
//!
//! ```ignore
//! let config = Engine::new().load(raw).parse(Some(&schema))?;
//! ```
//!
//! # Operations and the clap adapter
//!
//! [`EnvfigBuilder::handle()`] runs a [`ConfigAction`]: check, list, get one
//! key, generate a `.env.example` template, or print an inferred schema as
//! TOML. The `cli` module (behind the `clap` feature, on by default) provides
//! [`EnvArgs`] to embed `env check|list|get|gen|infer` in a clap app.
//!
//! # Error handling
//!
//! All fallible operations return [`EnvfigError`]. Validation errors carry the
//! field name and the offending value. With the `rich-errors` feature, errors
//! also implement `miette::Diagnostic`.

pub mod error;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
mod cli;
mod coerce;
mod config;
mod dotenv;
mod env;
mod file;
mod infer;
mod ops;
mod resolve;
mod schema;
mod validate;

#[cfg(test)]
mod fixtures;

pub use builder::{Envfig, EnvfigBuilder};
#[cfg(feature = "clap")]
pub use cli::{EnvArgs, EnvSubcommand};
pub use config::Config;
pub use dotenv::{decode_line, parse as parse_dotenv};
pub use error::EnvfigError;
pub use infer::{infer_kind, infer_schema, parse_number};
pub use ops::ConfigResult;
pub use resolve::{Engine, Loaded, RawEnv, RawValue, Uninitialized, load, load_inferred};
pub use schema::{FieldDescriptor, Schema, SchemaEntry, Validator};
pub use types::{Boundary, ConfigAction, Kind, SearchPath, Value};
