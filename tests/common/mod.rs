//! Fixture output directories shaped like a real Cello run

#![allow(dead_code)]

use std::path::Path;

pub const LOGIC: &str = "\
a,0,0,1,1
b,0,1,0,1
$54,1,1,1,0
$55,1,0,0,0
out,0,0,0,1
";

pub const ACTIVITY: &str = "\
a,0.0034,0.0034,2.8,2.8
b,0.0025,0.31,0.0025,0.31
$54,4.2,3.1,3.9,0.021
$55,2.5,0.05,0.04,0.01
out,0.002,0.003,0.004,1.95
";

/// Tab-indented, with the compiler's stray comma after the outer brace
pub const NETLIST: &str = "{\n\t\"name\": \"and\",\n\t\"inputs\": [\"a\", \"b\"],\n\t\"nodes\": [\n\t\t{\n\t\t\t\"name\": \"a\",\n\t\t\t\"nodeType\": \"PRIMARY_INPUT\",\n\t\t\t\"deviceName\": \"LacI_sensor\"\n\t\t},\n\t\t{\n\t\t\t\"name\": \"b\",\n\t\t\t\"nodeType\": \"PRIMARY_INPUT\",\n\t\t\t\"deviceName\": \"TetR_sensor\"\n\t\t},\n\t\t{\n\t\t\t\"name\": \"$54\",\n\t\t\t\"nodeType\": \"NOR\",\n\t\t\t\"deviceName\": \"P3_PhlF\"\n\t\t},\n\t\t{\n\t\t\t\"name\": \"$55\",\n\t\t\t\"nodeType\": \"NOT\",\n\t\t\t\"deviceName\": \"S4_SrpR\"\n\t\t},\n\t\t{\n\t\t\t\"name\": \"out\",\n\t\t\t\"nodeType\": \"PRIMARY_OUTPUT\",\n\t\t\t\"deviceName\": \"YFP_reporter\"\n\t\t}\n\t]\n},\n";

pub const LOG: &str = "\
2021-03-01 10:00:00,001 INFO  [main] DNACompiler - Executing stage: technologyMapping
2021-03-01 10:00:04,513 INFO  [main] SimulatedAnnealing - Score: 196.62
2021-03-01 10:00:05,020 INFO  [main] SimulatedAnnealing - Score: 201.5
2021-03-01 10:00:06,774 INFO  [main] DNACompiler - Executing stage: placing
";

pub fn write_output(dir: &Path, prefix: &str) {
    std::fs::write(dir.join(format!("{prefix}_logic.csv")), LOGIC).unwrap();
    std::fs::write(dir.join(format!("{prefix}_activity.csv")), ACTIVITY).unwrap();
    std::fs::write(dir.join(format!("{prefix}_outputNetlist.json")), NETLIST).unwrap();
    std::fs::write(dir.join(format!("{prefix}.log")), LOG).unwrap();
}

/// Sensor library for `signals`, tab-indented like the shipped chassis files
pub fn sensor_file(signals: &[&str]) -> String {
    let mut records = Vec::new();
    for (collection, suffix) in [
        ("input_sensors", "_sensor"),
        ("models", "_sensor_model"),
        ("structures", "_sensor_structure"),
    ] {
        for s in signals {
            records.push(format!(
                "\t{{\"collection\": \"{collection}\", \"name\": \"{s}{suffix}\"}}"
            ));
        }
    }
    records.push("\t{\"collection\": \"parts\", \"name\": \"pTac\", \"type\": \"promoter\"}".into());
    format!("[\n{}\n]\n", records.join(",\n"))
}
