// Copyright 2026 The Polycheck Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use assert_cmd::Command;
use predicates::prelude::*;

fn polycheck() -> Command {
    Command::cargo_bin("polycheck").unwrap()
}

#[test]
fn tools_stats_reports_totals_without_running_anything() {
    polycheck()
        .arg("tools")
        .arg("--stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("total tools:"))
        .stdout(predicate::str::contains("total levels:"));
}

#[test]
fn tools_graph_names_every_prerequisite() {
    polycheck()
        .arg("tools")
        .arg("--graph")
        .assert()
        .success()
        .stdout(predicate::str::contains("python-black"))
        .stdout(predicate::str::contains("ruff <-"));
}
