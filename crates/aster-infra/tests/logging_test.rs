// Copyright 2025 eraflo
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

//! Integration tests for the process-wide logger setup.

use aster_infra::logging;

// One test per binary: the logger is installed once per process.
#[test]
fn test_first_init_installs_the_logger_and_later_calls_keep_it() {
    assert!(logging::init());
    log::info!("logger installed");

    assert!(!logging::init());
    assert!(!logging::init_with_filter("aster_infra=debug"));
}
