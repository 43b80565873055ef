//! Benchmark instance loader.
//!
//! Parses the classic job-shop benchmark text format: a header line
//! `num_jobs num_machines`, then one line per job listing interleaved
//! `machine duration` pairs. Multi-instance files wrap each body in
//! `+++` delimiters under an `instance <name>` heading (the format of
//! the standard OR-Library collection dumps).
//!
//! Malformed input maps to [`Error::InvalidInstance`]; a parsed
//! instance additionally passes [`crate::validation::validate_instance`]
//! before being returned.

use crate::error::{Error, Result};
use crate::models::{Instance, Operation};
use crate::validation::preflight;

/// Parses a single instance body.
///
/// # Format
/// ```text
/// 2 3
/// 0 3 1 2
/// 2 5 0 1
/// ```
/// 2 jobs, 3 machines; job 0 runs on machine 0 for 3 then machine 1
/// for 2.
pub fn parse_instance(name: &str, body: &str) -> Result<Instance> {
    let mut lines = body.lines().map(str::trim).filter(|l| !l.is_empty());

    let header = lines
        .next()
        .ok_or_else(|| Error::InvalidInstance(format!("'{name}': empty body")))?;
    let mut header_fields = header.split_whitespace();
    let num_jobs = parse_field(name, header_fields.next(), "job count")?;
    let num_machines = parse_field(name, header_fields.next(), "machine count")?;

    let mut instance = Instance::new(name, num_machines);
    for line in lines.take(num_jobs) {
        let tokens: Vec<u64> = line
            .split_whitespace()
            .map(|t| {
                t.parse::<u64>().map_err(|_| {
                    Error::InvalidInstance(format!("'{name}': non-numeric token '{t}'"))
                })
            })
            .collect::<Result<_>>()?;
        if tokens.len() % 2 != 0 {
            return Err(Error::InvalidInstance(format!(
                "'{name}': odd token count in job line '{line}'"
            )));
        }
        let operations = tokens
            .chunks(2)
            .map(|pair| Operation::new(pair[0] as usize, pair[1]))
            .collect();
        instance.push_job(operations);
    }

    if instance.num_jobs() != num_jobs {
        return Err(Error::InvalidInstance(format!(
            "'{name}': header declares {num_jobs} jobs, found {}",
            instance.num_jobs()
        )));
    }
    preflight(&instance)?;
    Ok(instance)
}

/// Parses a multi-instance file.
///
/// Instances are introduced by `instance <name>` lines; each body is
/// enclosed in a pair of lines starting with `+`.
pub fn parse_instances(text: &str) -> Result<Vec<Instance>> {
    let mut instances = Vec::new();
    let mut current_name: Option<String> = None;
    let mut body = String::new();
    let mut reading = false;

    for line in text.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix("instance") {
            if let Some(name) = current_name.take() {
                if !body.is_empty() {
                    instances.push(parse_instance(&name, &body)?);
                }
            }
            current_name = Some(rest.trim().to_string());
            body.clear();
            reading = false;
        } else if line.starts_with('+') {
            reading = !reading;
        } else if reading && !line.is_empty() {
            body.push_str(line);
            body.push('\n');
        }
    }
    if let Some(name) = current_name {
        if !body.is_empty() {
            instances.push(parse_instance(&name, &body)?);
        }
    }

    Ok(instances)
}

fn parse_field(name: &str, field: Option<&str>, what: &str) -> Result<usize> {
    field
        .and_then(|f| f.parse::<usize>().ok())
        .ok_or_else(|| Error::InvalidInstance(format!("'{name}': missing or bad {what}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "2 3\n0 3 1 2\n2 5 0 1\n";

    #[test]
    fn test_parse_single_instance() {
        let inst = parse_instance("toy", BODY).unwrap();
        assert_eq!(inst.name, "toy");
        assert_eq!(inst.num_jobs(), 2);
        assert_eq!(inst.num_machines, 3);
        assert_eq!(inst.jobs[0], vec![Operation::new(0, 3), Operation::new(1, 2)]);
        assert_eq!(inst.jobs[1], vec![Operation::new(2, 5), Operation::new(0, 1)]);
    }

    #[test]
    fn test_parse_rejects_empty_body() {
        assert!(matches!(
            parse_instance("e", ""),
            Err(Error::InvalidInstance(_))
        ));
    }

    #[test]
    fn test_parse_rejects_odd_tokens() {
        let body = "1 2\n0 3 1\n";
        assert!(parse_instance("odd", body).is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let body = "1 2\n0 x\n";
        assert!(parse_instance("nan", body).is_err());
    }

    #[test]
    fn test_parse_rejects_job_count_mismatch() {
        let body = "3 2\n0 3\n";
        assert!(parse_instance("short", body).is_err());
    }

    #[test]
    fn test_parse_rejects_machine_out_of_range() {
        // Machine 5 in a 2-machine instance fails pre-flight.
        let body = "1 2\n5 3\n";
        assert!(parse_instance("oob", body).is_err());
    }

    #[test]
    fn test_parse_multi_instance_file() {
        let text = "\
instance ft-a
+++++++++
2 3
0 3 1 2
2 5 0 1
+++++++++
instance ft-b
+++++++++
1 1
0 7
+++++++++
";
        let instances = parse_instances(text).unwrap();
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].name, "ft-a");
        assert_eq!(instances[1].name, "ft-b");
        assert_eq!(instances[1].jobs[0], vec![Operation::new(0, 7)]);
    }

    #[test]
    fn test_parse_empty_file() {
        assert!(parse_instances("").unwrap().is_empty());
    }
}
