/*!
# Stockview

A small web-served inventory viewer, built in Rust.

## Overview

A user uploads a CSV/JSON inventory file; the server parses it into typed
rows; the client can then filter by category and minimum price, sort by any
field, and watch running aggregate statistics. State is a single in-memory
session: the working set the client sees, plus the immutable baseline taken
at upload time that `reset` restores.

## Architecture

The core is a load/filter/sort/stat pipeline over an in-memory record
collection, invoked through a thin axum HTTP boundary:

```text
upload → loader → session (working + original)
                  session.process → filter → sorting → stats
                  session.reset   → restore baseline
                  session.save    → result.json
```

Each process call narrows or reorders the *current* working set, so
successive filters compose; `reset` is the only way back to the baseline.

## Modules

- **record**: the `Record` row type and its required-field schema
- **loader**: file parsing and type coercion (CSV/TXT/JSON, all-or-nothing)
- **filter**: category substring and minimum-price predicates
- **sorting**: stable sort over a closed enum of fields
- **stats**: count / total value / average summary
- **session**: working-set + baseline state transitions
- **saving**: JSON dump of the working set
- **app**: axum routing, multipart upload, error-to-status mapping

## REST API Endpoints

- `POST /upload` - multipart file upload, replaces the session
- `POST /process` - `{category?, min_price?, sort?}` → data + stats
- `GET /reset` - restore the working set from the baseline
- `GET /save` - dump the working set to `result.json`
*/

pub mod app;
pub mod error;
pub mod filter;
pub mod loader;
pub mod record;
pub mod saving;
pub mod session;
pub mod sorting;
pub mod stats;

/// Re-export the core types for easier use
pub use error::*;
pub use record::*;
pub use session::*;
pub use stats::*;
