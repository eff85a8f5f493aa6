use std::fs;

use tempfile::TempDir;

use super::*;
use crate::utils::path::normalize_path;

fn provider(sources: &[(&str, &str)]) -> SourceProvider {
    let mut provider = SourceProvider::new(Vec::new());
    for (name, content) in sources {
        provider.registry_mut().register(name, content);
    }
    provider
}

fn ids(names: &[&str]) -> DependencySet {
    names.iter().map(|n| SourceId::inline(n)).collect()
}

#[test]
fn test_no_directives_is_identity() {
    let sources = [
        "void main() {}\n",
        "#version 330 core\nin vec3 pos;\r\nvoid main() {\n  gl_Position = vec4(pos, 1.0);\n}",
        "",
        "\n\n\n",
    ];

    for source in sources {
        let p = provider(&[("a.vert", source)]);
        let expansion = expand(&p, "a.vert").unwrap();
        assert_eq!(expansion.text, source);
        assert_eq!(expansion.dependencies, ids(&["a.vert"]));
        assert!(expansion.warnings.is_empty());
    }
}

#[test]
fn test_include_chain() {
    let p = provider(&[
        ("a.glsl", "a1\n$include \"b.glsl\"\na2\n"),
        ("b.glsl", "b1\n$include \"c.glsl\"\n"),
        ("c.glsl", "c1\n"),
    ]);

    let expansion = expand(&p, "a.glsl").unwrap();
    assert_eq!(
        expansion.text,
        "a1\n\
         //$include \"b.glsl\"\n\
         b1\n\
         //$include \"c.glsl\"\n\
         c1\n\
         //$include_end file \"b.glsl\" line 1\n\
         //$include_end file \"a.glsl\" line 1\n\
         a2\n"
    );
    assert_eq!(expansion.dependencies, ids(&["a.glsl", "b.glsl", "c.glsl"]));
}

#[test]
fn test_deep_chain_dependencies() {
    let mut sources = Vec::new();
    let names: Vec<String> = (0..12).map(|i| format!("u{i}.glsl")).collect();
    for i in 0..names.len() {
        let content = match names.get(i + 1) {
            Some(next) => format!("// unit {i}\n$include \"{next}\"\n"),
            None => "// leaf\n".to_string(),
        };
        sources.push((names[i].clone(), content));
    }
    let borrowed: Vec<(&str, &str)> = sources
        .iter()
        .map(|(n, c)| (n.as_str(), c.as_str()))
        .collect();
    let p = provider(&borrowed);

    let expansion = expand(&p, "u0.glsl").unwrap();
    let expected: Vec<&str> = names.iter().map(String::as_str).collect();
    assert_eq!(expansion.dependencies, ids(&expected));
    assert!(expansion.text.contains("// leaf\n"));
}

#[test]
fn test_double_include_becomes_marker() {
    let p = provider(&[
        ("a.glsl", "$include \"b.glsl\"\n$include \"b.glsl\"\n"),
        ("b.glsl", "b\n"),
    ]);

    let expansion = expand(&p, "a.glsl").unwrap();
    assert_eq!(
        expansion.text,
        "//$include \"b.glsl\"\n\
         b\n\
         //$include_end file \"a.glsl\" line 0\n\
         //$include \"b.glsl\" (prevented double-include)\n"
    );
    assert_eq!(expansion.text.matches("\nb\n").count(), 1);
    assert_eq!(expansion.dependencies.len(), 2);
}

#[test]
fn test_cyclic_include_terminates() {
    let p = provider(&[
        ("a.glsl", "a\n$include \"b.glsl\"\n"),
        ("b.glsl", "b\n$include \"a.glsl\"\n"),
    ]);

    let expansion = expand(&p, "a.glsl").unwrap();
    assert!(expansion.text.contains("//$include \"a.glsl\" (prevented double-include)"));
    assert_eq!(expansion.dependencies, ids(&["a.glsl", "b.glsl"]));
}

#[test]
fn test_missing_include_fails() {
    let p = provider(&[("a.glsl", "x\n$include \"lib/missing.glsl\"\n")]);

    match expand(&p, "a.glsl") {
        Err(BuildError::SourceNotFound { path, requested_by }) => {
            assert_eq!(path, "lib/missing.glsl");
            assert_eq!(requested_by, Some(SourceId::inline("a.glsl")));
        }
        other => panic!("expected SourceNotFound, got {other:?}"),
    }
}

#[test]
fn test_missing_entry_fails() {
    let p = provider(&[]);
    match expand(&p, "nothing.vert") {
        Err(BuildError::SourceNotFound { path, requested_by }) => {
            assert_eq!(path, "nothing.vert");
            assert!(requested_by.is_none());
        }
        other => panic!("expected SourceNotFound, got {other:?}"),
    }
}

#[test]
fn test_invalid_directive_is_neutralized() {
    let p = provider(&[("a.glsl", "$define X 1\nfloat x;\n  $pragma once\n")]);

    let expansion = expand(&p, "a.glsl").unwrap();
    assert_eq!(expansion.text, "//$define X 1\nfloat x;\n//  $pragma once\n");
    assert_eq!(expansion.warnings.len(), 2);
    assert_eq!(expansion.warnings[0].line, 1);
    assert_eq!(expansion.warnings[0].text, "$define X 1");
    assert_eq!(expansion.warnings[1].line, 3);
}

#[test]
fn test_include_body_without_trailing_newline() {
    let p = provider(&[("a.glsl", "$include \"b.glsl\""), ("b.glsl", "b")]);

    let expansion = expand(&p, "a.glsl").unwrap();
    assert_eq!(
        expansion.text,
        "//$include \"b.glsl\"\nb\n//$include_end file \"a.glsl\" line 0"
    );
}

#[test]
fn test_crlf_preserved_around_include() {
    let p = provider(&[("a.glsl", "x\r\n$include \"b.glsl\"\r\ny\r\n"), ("b.glsl", "b\r\n")]);

    let expansion = expand(&p, "a.glsl").unwrap();
    assert_eq!(
        expansion.text,
        "x\r\n//$include \"b.glsl\"\nb\r\n//$include_end file \"a.glsl\" line 1\r\ny\r\n"
    );
}

#[test]
fn test_nested_include_relative_to_includer() {
    let p = provider(&[
        ("main.glsl", "$include \"lib/b.glsl\"\n"),
        ("lib/b.glsl", "$include \"c.glsl\"\n"),
        ("lib/c.glsl", "inner\n"),
        ("c.glsl", "outer\n"),
    ]);

    let expansion = expand(&p, "main.glsl").unwrap();
    assert!(expansion.text.contains("inner\n"));
    assert!(!expansion.text.contains("outer"));
    assert!(expansion.dependencies.contains(&SourceId::inline("lib/c.glsl")));
    assert!(!expansion.dependencies.contains(&SourceId::inline("c.glsl")));
}

#[test]
fn test_each_expand_has_its_own_guard() {
    let p = provider(&[
        ("p.vert", "$include \"shared.glsl\"\n"),
        ("p.frag", "$include \"shared.glsl\"\n"),
        ("shared.glsl", "uniform float t;\n"),
    ]);

    let vert = expand(&p, "p.vert").unwrap();
    let frag = expand(&p, "p.frag").unwrap();
    assert!(vert.text.contains("uniform float t;\n"));
    assert!(frag.text.contains("uniform float t;\n"));
}

#[test]
fn test_files_resolve_relative_to_their_directory() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("post")).unwrap();
    fs::create_dir_all(root.join("lib")).unwrap();
    fs::write(
        root.join("post/blur.frag"),
        "$include \"common.glsl\"\n$include \"../lib/noise.glsl\"\n",
    )
    .unwrap();
    fs::write(root.join("post/common.glsl"), "// post common\n").unwrap();
    fs::write(root.join("lib/noise.glsl"), "// noise\n").unwrap();

    let p = SourceProvider::new(vec![root.to_path_buf()]);
    let expansion = expand(&p, "post/blur.frag").unwrap();

    assert!(expansion.text.contains("// post common\n"));
    assert!(expansion.text.contains("// noise\n"));
    assert!(expansion.text.contains("//$include \"lib/noise.glsl\"\n"));

    let expected: DependencySet = ["post/blur.frag", "post/common.glsl", "lib/noise.glsl"]
        .iter()
        .map(|n| SourceId::File(normalize_path(&root.join(n))))
        .collect();
    assert_eq!(expansion.dependencies, expected);
}

#[test]
fn test_inline_prefix_include_ignores_includer_directory() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("post")).unwrap();
    fs::write(root.join("post/blur.frag"), "$include \"<inline>/params.glsl\"\n").unwrap();

    let mut p = SourceProvider::new(vec![root.to_path_buf()]);
    p.registry_mut().register("params.glsl", "#define TAPS 4\n");

    let expansion = expand(&p, "post/blur.frag").unwrap();
    assert!(expansion.text.contains("#define TAPS 4\n"));
    assert!(expansion.dependencies.contains(&SourceId::inline("params.glsl")));
}

#[test]
fn test_inline_prefix_include_skips_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("blur.frag"), "$include \"<inline>/params.glsl\"\n").unwrap();
    fs::write(root.join("params.glsl"), "#define TAPS 2\n").unwrap();

    let p = SourceProvider::new(vec![root.to_path_buf()]);

    match expand(&p, "blur.frag") {
        Err(BuildError::SourceNotFound { path, requested_by }) => {
            assert_eq!(path, "<inline>/params.glsl");
            assert_eq!(
                requested_by,
                Some(SourceId::File(normalize_path(&root.join("blur.frag"))))
            );
        }
        other => panic!("expected SourceNotFound, got {other:?}"),
    }
}

#[test]
fn test_unreadable_include_is_not_shadowed_by_later_root() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    fs::write(first.path().join("blur.frag"), "$include \"noise.glsl\"\n").unwrap();
    fs::write(first.path().join("noise.glsl"), [0xff, 0xfe, b'x']).unwrap();
    fs::write(second.path().join("noise.glsl"), "stale fallback\n").unwrap();

    let p = SourceProvider::new(vec![first.path().to_path_buf(), second.path().to_path_buf()]);

    match expand(&p, "blur.frag") {
        Err(BuildError::SourceUnreadable { path, requested_by, .. }) => {
            assert_eq!(path, normalize_path(&first.path().join("noise.glsl")));
            assert_eq!(
                requested_by,
                Some(SourceId::File(normalize_path(&first.path().join("blur.frag"))))
            );
        }
        other => panic!("expected SourceUnreadable, got {other:?}"),
    }
}

#[test]
fn test_end_marker_uses_zero_based_directive_index() {
    let p = provider(&[
        ("a.glsl", "$include \"b.glsl\"\n\n\n$include \"c.glsl\"\n$bogus\n"),
        ("b.glsl", "b\n"),
        ("c.glsl", "c\n"),
    ]);

    let expansion = expand(&p, "a.glsl").unwrap();
    assert!(expansion.text.contains("//$include_end file \"a.glsl\" line 0\n"));
    assert!(expansion.text.contains("//$include_end file \"a.glsl\" line 3\n"));
    // Warnings are for people and count from 1
    assert_eq!(expansion.warnings[0].line, 5);
}
