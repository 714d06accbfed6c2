use clonetree::cli;
use clonetree::phylogeny::{ExportFormat, TreeError};
use clonetree::run::build;

use color_eyre::eyre::{Report, Result};
use indoc::indoc;
use std::path::PathBuf;
use tempfile::TempDir;

const PATIENT: &str = indoc! {r#"
    {
        "patient": {
            "id": "P-0000004",
            "data": [
                {"ancestorClone": "1", "descendantClone": "2"},
                {"ancestorClone": "2", "descendantClone": "3"},
                {"ancestorClone": "1", "descendantClone": "4"},
                {"ancestorClone": "4", "descendantClone": "5"},
                {"ancestorClone": "4", "descendantClone": "13"}
            ]
        }
    }
"#};

fn write(dir: &TempDir, name: &str, contents: &str) -> Result<PathBuf, Report> {
    let path = dir.path().join(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

#[test]
fn patient_json() -> Result<(), Report> {
    let tmp_dir = TempDir::new()?;
    let output_dir = tmp_dir.path().join("build");

    let args = cli::build::Args {
        edges: write(&tmp_dir, "edges.json", PATIENT)?,
        output_dir: output_dir.clone(),
        formats: vec![ExportFormat::Json, ExportFormat::Newick, ExportFormat::Dot],
        ..Default::default()
    };
    let summary = build(&args)?;

    assert_eq!(summary.root.as_deref(), Some("1"));
    assert_eq!(summary.clones, 6);
    assert_eq!(summary.edges, 5);
    assert_eq!(summary.outputs.len(), 3);

    let newick = std::fs::read_to_string(output_dir.join("tree.nwk"))?;
    assert_eq!(newick, "((3:0.1)2:0.1,(5:0.1,13:0.1)4:0.1)1:0.1;\n");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output_dir.join("tree.json"))?)?;
    let root = &json[0];
    assert_eq!(root["name"], "1");
    assert_eq!(root["nodeSvgShape"]["shapeProps"]["fill"], "#A6CEE3");
    assert_eq!(root["nodeSvgShape"]["shapeProps"]["r"], 10);
    assert_eq!(root["children"][1]["name"], "4");
    assert_eq!(root["children"][1]["children"][1]["name"], "13");
    assert_eq!(
        root["children"][1]["children"][1]["nodeSvgShape"]["shapeProps"]["fill"],
        "white"
    );
    assert!(root["children"][0]["children"][0].get("children").is_none());

    let dot = std::fs::read_to_string(output_dir.join("tree.dot"))?;
    assert!(dot.contains("rankdir=\"LR\""));

    assert!(output_dir.join("build_args.json").exists());
    assert!(output_dir.join("summary.json").exists());

    Ok(())
}

#[test]
fn table_with_palette() -> Result<(), Report> {
    let tmp_dir = TempDir::new()?;
    let output_dir = tmp_dir.path().join("build");

    let edges = indoc! {"
        ancestorClone\tdescendantClone
        A\tB
        A\tC
    "};
    let palette = indoc! {"
        clone,color
        A,red
        C,blue
    "};

    let args = cli::build::Args {
        edges: write(&tmp_dir, "edges.tsv", edges)?,
        palette: Some(write(&tmp_dir, "palette.csv", palette)?),
        default_color: "grey".to_string(),
        output_dir: output_dir.clone(),
        prefix: "patient".to_string(),
        ..Default::default()
    };
    build(&args)?;

    let newick = std::fs::read_to_string(output_dir.join("patient.nwk"))?;
    assert_eq!(newick, "(B:0.1,C:0.1)A:0.1;\n");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output_dir.join("patient.json"))?)?;
    let fills = [&json[0], &json[0]["children"][0], &json[0]["children"][1]]
        .iter()
        .map(|node| node["nodeSvgShape"]["shapeProps"]["fill"].clone())
        .collect::<Vec<_>>();
    assert_eq!(fills, vec!["red", "grey", "blue"]);

    Ok(())
}

#[test]
fn missing_data_is_empty() -> Result<(), Report> {
    let tmp_dir = TempDir::new()?;
    let output_dir = tmp_dir.path().join("build");

    let args = cli::build::Args {
        edges: write(&tmp_dir, "edges.json", r#"{"patient": {"id": "P", "data": null}}"#)?,
        output_dir: output_dir.clone(),
        ..Default::default()
    };
    let summary = build(&args)?;

    assert_eq!(summary.root, None);
    assert_eq!(summary.clones, 0);
    assert_eq!(std::fs::read_to_string(output_dir.join("tree.json"))?, "[]\n");
    assert_eq!(std::fs::read_to_string(output_dir.join("tree.nwk"))?, "\n");

    Ok(())
}

#[test]
fn poorly_defined_tree() -> Result<(), Report> {
    let tmp_dir = TempDir::new()?;
    let output_dir = tmp_dir.path().join("build");

    let edges = indoc! {r#"
        [
            {"ancestorClone": "A", "descendantClone": "B"},
            {"ancestorClone": "C", "descendantClone": "D"}
        ]
    "#};
    let args = cli::build::Args {
        edges: write(&tmp_dir, "edges.json", edges)?,
        output_dir: output_dir.clone(),
        ..Default::default()
    };

    let report = build(&args).unwrap_err();
    let error = report.downcast_ref::<TreeError>();
    assert_eq!(
        error,
        Some(&TreeError::AmbiguousRoot {
            first: "A".to_string(),
            second: "C".to_string()
        })
    );
    assert!(!output_dir.join("tree.nwk").exists());

    Ok(())
}
