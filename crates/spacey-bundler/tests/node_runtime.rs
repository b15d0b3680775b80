// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Bundle execution tests
//!
//! Runs generated bundles under Node.js and compares their output with the
//! same modules loaded natively. Skipped when `node` is not installed.

use spacey_bundler::{DEFAULT_EXTENSIONS, bundle_entry};
use std::fs;
use std::path::Path;
use std::process::Command;

fn node_available() -> bool {
    Command::new("node")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn write_project(root: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        let path = root.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

fn extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

/// Run `path` with node, returning stdout
fn run_node(path: &Path) -> String {
    let output = Command::new("node").arg(path).output().unwrap();
    assert!(
        output.status.success(),
        "node failed on {}:\n{}",
        path.display(),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

/// Bundle `entry` and run the bundle with node
fn run_bundle(root: &Path, entry: &str) -> String {
    let bundle = bundle_entry(&root.join(entry), None, "bundle.js", &extensions()).unwrap();
    let script = root.join("bundle.cjs");
    fs::write(&script, &bundle.artifact("bundle.js").unwrap().content).unwrap();
    run_node(&script)
}

#[test]
fn test_cycle_sees_partial_exports() {
    if !node_available() {
        eprintln!("node not found, skipping");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    write_project(
        dir.path(),
        &[
            (
                "a.js",
                "import { b } from './b.js';\nexport const a = 'a';\nconsole.log('a sees ' + b);\n",
            ),
            (
                "b.js",
                "import { a } from './a.js';\nexport const b = 'b';\nconsole.log('b sees ' + a);\n",
            ),
        ],
    );

    assert_eq!(run_bundle(dir.path(), "a.js"), "b sees undefined\na sees b\n");
}

#[test]
fn test_bundle_matches_native_modules() {
    if !node_available() {
        eprintln!("node not found, skipping");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    write_project(
        dir.path(),
        &[
            (
                "main.mjs",
                "import greet, { twice as double, PI } from './lib/math.mjs';\n\
                 import * as shapes from './lib/shapes.mjs';\n\
                 import Counter from './lib/counter.mjs';\n\
                 import { area, label } from './lib/index.mjs';\n\
                 \n\
                 function show(PI) {\n\
                 \x20 return 'shadowed ' + PI;\n\
                 }\n\
                 \n\
                 const counter = new Counter(2);\n\
                 counter.bump();\n\
                 console.log(greet('bundle'));\n\
                 console.log(double(21), PI > 3, show('pi'));\n\
                 console.log(shapes.square(3), shapes.kind, typeof shapes.default);\n\
                 console.log(counter.value, area(2), label);\n\
                 for (const n of [1, 2]) {\n\
                 \x20 const greet = n * 10;\n\
                 \x20 console.log(greet);\n\
                 }\n",
            ),
            (
                "lib/math.mjs",
                "export const PI = 3.14159;\n\
                 const twice = (x) => x * 2;\n\
                 export { twice };\n\
                 export default function greet(name) {\n\
                 \x20 return `hello ${name}`;\n\
                 }\n",
            ),
            (
                "lib/shapes.mjs",
                "export function square(x) {\n\
                 \x20 return x * x;\n\
                 }\n\
                 export let kind = 'shape';\n",
            ),
            (
                "lib/counter.mjs",
                "export default class Counter {\n\
                 \x20 constructor(start) {\n\
                 \x20   this.value = start;\n\
                 \x20 }\n\
                 \x20 bump() {\n\
                 \x20   this.value += 1;\n\
                 \x20 }\n\
                 }\n",
            ),
            (
                "lib/index.mjs",
                "export * from './circle.mjs';\n\
                 export { kind as label } from './shapes.mjs';\n",
            ),
            (
                "lib/circle.mjs",
                "import { PI } from './math.mjs';\n\
                 export const area = (r) => PI * r * r;\n\
                 export default 'not re-exported';\n",
            ),
        ],
    );

    let native = run_node(&dir.path().join("main.mjs"));
    assert_eq!(
        native,
        "hello bundle\n42 true shadowed pi\n9 shape undefined\n3 12.56636 shape\n10\n20\n"
    );
    assert_eq!(run_bundle(dir.path(), "main.mjs"), native);
}

#[test]
fn test_each_module_runs_once() {
    if !node_available() {
        eprintln!("node not found, skipping");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    write_project(
        dir.path(),
        &[
            ("main.js", "import './a.js';\nimport './b.js';\nimport './shared.js';\n"),
            ("a.js", "import './shared.js';\nconsole.log('a');\n"),
            ("b.js", "import './shared.js';\nconsole.log('b');\n"),
            ("shared.js", "console.log('shared');\n"),
        ],
    );

    assert_eq!(run_bundle(dir.path(), "main.js"), "shared\na\nb\n");
}

#[test]
fn test_package_import_runs() {
    if !node_available() {
        eprintln!("node not found, skipping");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    write_project(
        dir.path(),
        &[
            ("src/main.js", "import { pad } from 'left-pad';\nconsole.log(pad('7', 3));\n"),
            ("node_modules/left-pad/package.json", "{ \"main\": \"lib/pad\" }"),
            (
                "node_modules/left-pad/lib/pad.js",
                "export function pad(text, width) {\n  return '0'.repeat(width - text.length) + text;\n}\n",
            ),
        ],
    );

    assert_eq!(run_bundle(dir.path(), "src/main.js"), "007\n");
}

#[test]
fn test_modules_run_in_strict_mode() {
    if !node_available() {
        eprintln!("node not found, skipping");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    write_project(
        dir.path(),
        &[
            (
                "main.mjs",
                "import { kind } from './lib.mjs';\n\
                 console.log(typeof this);\n\
                 console.log(kind());\n\
                 try {\n\
                 \x20 undeclared = 1;\n\
                 \x20 console.log('sloppy');\n\
                 } catch (e) {\n\
                 \x20 console.log(e.name);\n\
                 }\n",
            ),
            ("lib.mjs", "export function kind() {\n  return typeof this;\n}\n"),
        ],
    );

    let native = run_node(&dir.path().join("main.mjs"));
    assert_eq!(native, "undefined\nundefined\nReferenceError\n");
    assert_eq!(run_bundle(dir.path(), "main.mjs"), native);
}

#[test]
fn test_imports_evaluate_before_the_importer() {
    if !node_available() {
        eprintln!("node not found, skipping");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    write_project(
        dir.path(),
        &[
            (
                "main.mjs",
                "console.log('main');\n\
                 import './a.mjs';\n\
                 console.log(label);\n\
                 import { label } from './b.mjs';\n",
            ),
            ("a.mjs", "console.log('a');\n"),
            ("b.mjs", "console.log('b');\nexport const label = 'b label';\n"),
        ],
    );

    let native = run_node(&dir.path().join("main.mjs"));
    assert_eq!(native, "a\nb\nmain\nb label\n");
    assert_eq!(run_bundle(dir.path(), "main.mjs"), native);
}

#[test]
fn test_package_exports_field_runs() {
    if !node_available() {
        eprintln!("node not found, skipping");
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    write_project(
        dir.path(),
        &[
            (
                "main.mjs",
                "import { name } from 'modern';\nimport { extra } from 'modern/extra';\nconsole.log(name, extra);\n",
            ),
            (
                "node_modules/modern/package.json",
                "{ \"main\": \"legacy.js\", \"exports\": { \".\": { \"import\": \"./esm/index.mjs\", \"require\": \"./legacy.js\" }, \"./extra\": \"./esm/extra.mjs\" } }",
            ),
            ("node_modules/modern/legacy.js", "exports.name = 'legacy';\n"),
            ("node_modules/modern/esm/index.mjs", "export const name = 'modern';\n"),
            ("node_modules/modern/esm/extra.mjs", "export const extra = 'extra';\n"),
        ],
    );

    let native = run_node(&dir.path().join("main.mjs"));
    assert_eq!(native, "modern extra\n");
    assert_eq!(run_bundle(dir.path(), "main.mjs"), native);
}
