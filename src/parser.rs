//! OARLIB text format reader/writer (§4.9, §6). Line-oriented, header tokens
//! order-independent, `LINKS`/`VERTICES` sections with optional `LINE FORMAT:`
//! column overrides.

use crate::error::ParseError;
use crate::graph::{Graph, GraphKind, VertexId};
use crate::problem::Problem;

pub struct ParsedInstance {
	pub problem: Problem,
	pub instance_name: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Section {
	None,
	Links,
	Vertices,
}

pub fn parse(text: &str) -> Result<ParsedInstance, ParseError> {
	let mut kind: Option<GraphKind> = None;
	let mut declared_n: Option<u32> = None;
	let mut depot_id: Option<u32> = None;
	let mut max_vertex_seen: u32 = 0;

	let mut link_rows: Vec<Vec<String>> = Vec::new();
	let mut link_line_numbers: Vec<usize> = Vec::new();
	let mut link_format: Option<Vec<String>> = None;
	let mut vertex_rows: Vec<Vec<String>> = Vec::new();
	let mut vertex_format: Option<Vec<String>> = None;

	let mut section = Section::None;
	let mut saw_links_section = false;

	for (idx, raw) in text.lines().enumerate() {
		let line_no = idx + 1;
		let line = raw.trim();
		if line.is_empty() || line.starts_with('%') {
			continue;
		}
		let upper = line.to_uppercase();

		if upper == "LINKS" {
			section = Section::Links;
			saw_links_section = true;
			link_format = None;
			continue;
		}
		if upper == "END LINKS" {
			section = Section::None;
			continue;
		}
		if upper == "VERTICES" {
			section = Section::Vertices;
			vertex_format = None;
			continue;
		}
		if upper == "END VERTICES" {
			section = Section::None;
			continue;
		}
		if let Some(rest) = strip_prefix_ci(line, "LINE FORMAT:") {
			let tokens: Vec<String> = rest.split(',').map(|t| t.trim().to_uppercase()).collect();
			match section {
				Section::Links => link_format = Some(tokens),
				Section::Vertices => vertex_format = Some(tokens),
				Section::None => return Err(ParseError::new(line_no, "LINE FORMAT outside a section".to_string())),
			}
			continue;
		}
		if let Some(rest) = strip_prefix_ci(line, "GRAPH TYPE:") {
			kind = Some(parse_graph_kind(rest.trim(), line_no)?);
			continue;
		}
		if let Some(rest) = strip_prefix_ci(line, "N:") {
			declared_n = Some(parse_uint(rest.trim(), line_no, "N")?);
			continue;
		}
		if let Some(rest) = strip_prefix_ci(line, "M:") {
			let _ = parse_uint(rest.trim(), line_no, "M")?;
			continue;
		}
		if let Some(rest) = strip_prefix_ci(line, "DEPOT ID:") {
			depot_id = Some(parse_uint(rest.trim(), line_no, "Depot ID")?);
			continue;
		}

		match section {
			Section::Links => {
				let cols: Vec<String> = line.split(',').map(|t| t.trim().to_string()).collect();
				for c in cols.iter().take(2) {
					if let Ok(v) = c.parse::<u32>() {
						max_vertex_seen = max_vertex_seen.max(v);
					}
				}
				link_rows.push(cols);
				link_line_numbers.push(line_no);
			}
			Section::Vertices => {
				let cols: Vec<String> = line.split(',').map(|t| t.trim().to_string()).collect();
				vertex_rows.push(cols);
			}
			Section::None => return Err(ParseError::new(line_no, format!("unexpected data line outside any section: {}", line))),
		}
	}

	let kind = kind.ok_or_else(|| ParseError::new(0, "missing Graph Type header".to_string()))?;
	if !saw_links_section {
		return Err(ParseError::new(0, "missing LINKS section".to_string()));
	}

	let n = declared_n.unwrap_or(max_vertex_seen);
	if n == 0 {
		return Err(ParseError::new(0, "graph has no vertices".to_string()));
	}

	let mut g = Graph::new(kind);
	for _ in 0..n {
		g.add_vertex();
	}

	let default_link_format = default_link_columns(kind);
	let format = link_format.as_deref().unwrap_or(&default_link_format);

	let mut accepted = 0usize;
	for (row, &line_no) in link_rows.iter().zip(link_line_numbers.iter()) {
		match parse_link_row(&g, kind, format, row, n, line_no) {
			Ok((p1, p2, fwd, rev, required, directed)) => {
				g.add_link(p1, p2, fwd, rev, required, directed, None);
				accepted += 1;
			}
			Err(e) => {
				if e.reason.contains("references vertex id") {
					return Err(e);
				}
				log::warn!("{}", e);
			}
		}
	}
	if accepted == 0 {
		return Err(ParseError::new(0, "LINKS section produced no valid links".to_string()));
	}

	let default_vertex_format = vec!["ID".to_string(), "X".to_string(), "Y".to_string()];
	let vformat = vertex_format.as_deref().unwrap_or(&default_vertex_format);
	for row in &vertex_rows {
		if let Some((id, x, y)) = parse_vertex_row(vformat, row) {
			if (id.0 as usize) < g.node_count() {
				g.set_coordinates(id, (x, y));
			}
		}
	}

	let depot = VertexId(depot_id.unwrap_or(1).saturating_sub(1));
	let problem = Problem::new(g, depot);
	Ok(ParsedInstance { problem, instance_name: "instance".to_string() })
}

fn strip_prefix_ci<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
	if line.len() >= prefix.len() && line[..prefix.len()].eq_ignore_ascii_case(prefix) {
		Some(&line[prefix.len()..])
	} else {
		None
	}
}

fn parse_graph_kind(s: &str, line_no: usize) -> Result<GraphKind, ParseError> {
	match s.to_lowercase().as_str() {
		"undirected" => Ok(GraphKind::Undirected),
		"directed" => Ok(GraphKind::Directed),
		"mixed" => Ok(GraphKind::Mixed),
		"windy" => Ok(GraphKind::Windy),
		other => Err(ParseError::new(line_no, format!("unknown graph type '{}'", other))),
	}
}

fn parse_uint(s: &str, line_no: usize, field: &str) -> Result<u32, ParseError> {
	s.parse::<u32>().map_err(|_| ParseError::new(line_no, format!("{} is not a non-negative integer: '{}'", field, s)))
}

fn parse_bool(s: &str) -> Option<bool> {
	match s.trim().to_lowercase().as_str() {
		"true" | "t" | "yes" | "1" => Some(true),
		"false" | "f" | "no" | "0" => Some(false),
		_ => None,
	}
}

fn default_link_columns(kind: GraphKind) -> Vec<String> {
	let mut cols = vec!["V1".to_string(), "V2".to_string(), "COST".to_string()];
	match kind {
		GraphKind::Windy => cols.push("REVERSECOST".to_string()),
		GraphKind::Mixed => cols.push("ISDIRECTED".to_string()),
		GraphKind::Undirected | GraphKind::Directed => {}
	}
	cols.push("REQUIRED".to_string());
	cols
}

fn column(format: &[String], row: &[String], name: &str) -> Option<String> {
	format.iter().position(|c| c == name).and_then(|i| row.get(i)).cloned()
}

#[allow(clippy::type_complexity)]
fn parse_link_row(_g: &Graph, kind: GraphKind, format: &[String], row: &[String], n: u32, line_no: usize) -> Result<(VertexId, VertexId, i64, i64, bool, bool), ParseError> {
	let v1 = column(format, row, "V1").ok_or_else(|| ParseError::new(line_no, "link row missing V1".to_string()))?;
	let v2 = column(format, row, "V2").ok_or_else(|| ParseError::new(line_no, "link row missing V2".to_string()))?;
	let cost = column(format, row, "COST").ok_or_else(|| ParseError::new(line_no, "link row missing COST".to_string()))?;

	let v1: u32 = v1.parse().map_err(|_| ParseError::new(line_no, format!("bad vertex id '{}'", v1)))?;
	let v2: u32 = v2.parse().map_err(|_| ParseError::new(line_no, format!("bad vertex id '{}'", v2)))?;
	let cost: i64 = cost.parse().map_err(|_| ParseError::new(line_no, format!("bad cost '{}'", cost)))?;

	if v1 == 0 || v2 == 0 || v1 > n || v2 > n {
		return Err(ParseError::new(line_no, format!("link references vertex id > N ({}, {})", v1, v2)));
	}

	let reverse_cost = match kind {
		GraphKind::Windy => {
			let rc = column(format, row, "REVERSECOST").ok_or_else(|| ParseError::new(line_no, "windy link row missing REVERSECOST".to_string()))?;
			rc.parse::<i64>().map_err(|_| ParseError::new(line_no, format!("bad reverse cost '{}'", rc)))?
		}
		_ => cost,
	};

	let directed = match kind {
		GraphKind::Directed => true,
		GraphKind::Undirected | GraphKind::Windy => false,
		GraphKind::Mixed => column(format, row, "ISDIRECTED").and_then(|t| parse_bool(&t)).unwrap_or(false),
	};

	let required = column(format, row, "REQUIRED").and_then(|t| parse_bool(&t)).unwrap_or(true);

	Ok((VertexId(v1 - 1), VertexId(v2 - 1), cost, reverse_cost, required, directed))
}

fn parse_vertex_row(format: &[String], row: &[String]) -> Option<(VertexId, f64, f64)> {
	let id = column(format, row, "ID").and_then(|t| t.parse::<u32>().ok())?;
	let x = column(format, row, "X").and_then(|t| t.parse::<f64>().ok())?;
	let y = column(format, row, "Y").and_then(|t| t.parse::<f64>().ok())?;
	Some((VertexId(id.saturating_sub(1)), x, y))
}

/// Serializes a graph back to OARLIB text, readable by [`parse`]. Used by the
/// parse→serialize→parse round-trip property test.
pub fn to_oarlib_text(g: &Graph, depot: VertexId) -> String {
	let kind_name = match g.kind {
		GraphKind::Undirected => "undirected",
		GraphKind::Directed => "directed",
		GraphKind::Mixed => "mixed",
		GraphKind::Windy => "windy",
	};
	let mut out = String::new();
	out.push_str(&format!("Graph Type: {}\n", kind_name));
	out.push_str(&format!("N: {}\n", g.node_count()));
	out.push_str(&format!("M: {}\n", g.link_count()));
	out.push_str(&format!("Depot ID: {}\n", depot.0 + 1));
	out.push_str("LINKS\n");
	for link in g.links() {
		match g.kind {
			GraphKind::Windy => out.push_str(&format!("{},{},{},{},{}\n", link.p1.0 + 1, link.p2.0 + 1, link.forward_cost, link.reverse_cost, link.required)),
			GraphKind::Mixed => out.push_str(&format!("{},{},{},{},{}\n", link.p1.0 + 1, link.p2.0 + 1, link.forward_cost, link.directed, link.required)),
			GraphKind::Undirected | GraphKind::Directed => out.push_str(&format!("{},{},{},{}\n", link.p1.0 + 1, link.p2.0 + 1, link.forward_cost, link.required)),
		}
	}
	out.push_str("END LINKS\n");
	out
}
