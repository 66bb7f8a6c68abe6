//! # XRM Pipeline Plugins
//!
//! > **Synchronous event handlers for a CRM platform's message pipeline.**
//!
//! This crate contains two small, stateless plugins plus the seam they need
//! from the host:
//!
//! - **Rich-text export cleanup**: strips HTML markup from rich-text columns
//!   of a record batch before an "Export to Excel" operation, so Excel cells
//!   show readable text instead of raw markup.
//! - **Localized name substitution**: rewrites the display name of retrieved
//!   records and their lookup references to the spelling matching the
//!   calling user's UI language.
//!
//! ## Design Philosophy
//!
//! The host platform owns everything heavyweight: storage, metadata,
//! security, and the pipeline that decides when a handler fires. The plugins
//! consume two narrow views of that world — an invocation context and a
//! blocking data-access trait — and mutate the in-memory records the host
//! hands them. Nothing here persists state or spawns work; every invocation
//! runs to completion on the host's thread.
//!
//! That narrowness is deliberate: with the seam this small, every handler
//! can be exercised against a scripted mock and nothing else.
//!
//! ## Module Tour
//!
//! ### 1. The Seam ([`pipeline`])
//! The contract with the host: [`ExecutionContext`](pipeline::ExecutionContext),
//! the [`Plugin`](pipeline::Plugin) trait, the
//! [`DataService`](pipeline::DataService) collaborator, the shared error
//! types, and a scripted [`MockService`](pipeline::MockService) for tests.
//!
//! ### 2. The Views ([`domain`])
//! Plain data shapes for records, references, batches, and attribute
//! schemas. No behavior beyond accessors.
//!
//! ### 3. The Core ([`html`])
//! The HTML-to-plain-text normalization routine — a fixed-order sequence of
//! text-cleanup steps with documented scanning semantics. This is the only
//! algorithmically interesting piece of the crate.
//!
//! ### 4. The Handlers ([`richtext_plugin`], [`locale_plugin`])
//! The two shipped plugins: each is a trigger filter wrapped around its
//! transformation, returning silently when the invocation is not its
//! business.
//!
//! ### 5. The Runner ([`runtime`])
//! [`PluginPipeline`](runtime::PluginPipeline) dispatches one invocation
//! through the registered plugins in order, and
//! [`setup_tracing`](runtime::setup_tracing) wires up logging for embedding
//! hosts.
//!
//! ## Quick Start
//!
//! ```
//! use uuid::Uuid;
//! use xrm_plugins::domain::RecordCollection;
//! use xrm_plugins::pipeline::{
//!     ExecutionContext, MockService, OutputParameter, PARAM_BUSINESS_ENTITY_COLLECTION,
//! };
//! use xrm_plugins::runtime::PluginPipeline;
//!
//! // The host would supply a live context and data service; tests script a
//! // mock instead.
//! let service = MockService::new();
//! let mut context = ExecutionContext::new("Execute", "account")
//!     .with_user(Uuid::new_v4())
//!     .with_output(
//!         PARAM_BUSINESS_ENTITY_COLLECTION,
//!         OutputParameter::Collection(RecordCollection::new("account")),
//!     );
//!
//! // Neither trigger filter matches an "Execute" message, so this is a
//! // clean no-op and the empty mock never sees a call.
//! let pipeline = PluginPipeline::standard();
//! pipeline.execute(&mut context, &service).unwrap();
//! service.verify();
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod domain;
pub mod html;
pub mod locale_plugin;
pub mod pipeline;
pub mod richtext_plugin;
pub mod runtime;
