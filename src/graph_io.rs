use std::{
    convert::TryFrom,
    error::Error,
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use route_search::graph::{Attribute, Edges, GraphSize, MatrixGraph, Node, Vertex};

enum Record {
    Vertex(Vertex),
    Edge(i64, i64, i64),
}

pub fn import_graph<P: AsRef<Path>>(
    filename: P,
    vertices: Option<usize>,
) -> Result<MatrixGraph, Box<dyn Error>> {
    let file = File::open(filename.as_ref())?;
    let graph = read_graph(BufReader::new(file), vertices)?;
    log::info!(
        "Imported graph from {:?}: {} nodes, {} edges.",
        filename.as_ref(),
        graph.n(),
        graph.m()
    );
    Ok(graph)
}

/// Largest vertex count [`read_graph`] infers on its own. Bigger graphs need an explicit count.
pub const MAX_INFERRED_VERTICES: usize = 5_000;

/// Reads `Vertex` and `Edge` records. Without `vertices`, the graph gets one node per index up to
/// the largest one mentioned, which must stay below [`MAX_INFERRED_VERTICES`].
pub fn read_graph<R: BufRead>(
    reader: R,
    vertices: Option<usize>,
) -> Result<MatrixGraph, Box<dyn Error>> {
    let mut records = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(record) = parse_line(&line, i + 1)? {
            records.push((i + 1, record));
        }
    }

    let n = match vertices {
        Some(n) => n,
        None => infer_vertices(&records)?,
    };

    let mut graph = MatrixGraph::new(n);
    for (_, record) in records {
        match record {
            Record::Vertex(vertex) => graph.add_vertex(vertex),
            Record::Edge(src, dest, weight) => match (Node::try_from(src), Node::try_from(dest)) {
                (Ok(src), Ok(dest)) => graph.add_edge(src, dest, weight),
                _ => log::trace!("Ignoring edge {} -- {}.", src, dest),
            },
        }
    }
    Ok(graph)
}

fn infer_vertices(records: &[(usize, Record)]) -> Result<usize, Box<dyn Error>> {
    let largest = records
        .iter()
        .map(|(number, r)| match r {
            Record::Vertex(v) => (v.id().id() as i64, *number),
            Record::Edge(src, dest, _) => (*src.max(dest), *number),
        })
        .max();
    let (max, number) = match largest {
        Some(largest) if largest.0 >= 0 => largest,
        _ => return Ok(0),
    };
    match usize::try_from(max) {
        Ok(max) if max < MAX_INFERRED_VERTICES => Ok(max + 1),
        _ => Err(format!(
            "line {}: index {} needs more than {} vertices, give the vertex count explicitly",
            number, max, MAX_INFERRED_VERTICES
        )
        .into()),
    }
}

fn parse_line(line: &str, number: usize) -> Result<Option<Record>, Box<dyn Error>> {
    let line = line.trim_start();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let int = |i: usize| -> Result<i64, Box<dyn Error>> {
        tokens[i]
            .parse::<i64>()
            .map_err(|e| {
                Box::<dyn Error>::from(format!(
                    "line {}: invalid integer {:?}: {}",
                    number, tokens[i], e
                ))
            })
    };

    match tokens[0] {
        "Vertex" | "[Vertex]" => {
            if tokens.len() < 5 {
                log::warn!("Malformed vertex on line {}: {}", number, line);
                return Ok(None);
            }
            let id = Node::try_from(int(2)?)
                .map_err(|_| format!("line {}: negative vertex id {}", number, tokens[2]))?;
            let attr = if tokens.len() >= 6 {
                let value = int(5)?;
                Attribute::try_from(value).unwrap_or_else(|v| {
                    log::warn!("Unknown attribute {} on line {}, using Empty.", v, number);
                    Attribute::Empty
                })
            } else {
                Attribute::Empty
            };
            let vertex = Vertex::new(tokens[1], id, (int(3)?, int(4)?)).with_attr(attr);
            Ok(Some(Record::Vertex(vertex)))
        }
        "Edge" | "[Edge]" => {
            if tokens.len() < 4 {
                log::warn!("Malformed edge on line {}: {}", number, line);
                return Ok(None);
            }
            Ok(Some(Record::Edge(int(1)?, int(2)?, int(3)?)))
        }
        other => {
            log::warn!("Unknown record {:?} on line {}.", other, number);
            Ok(None)
        }
    }
}

pub fn export_graph<P: AsRef<Path>>(
    filename: P,
    graph: &MatrixGraph,
) -> Result<(), Box<dyn Error>> {
    let file = File::create(filename.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_graph(&mut writer, graph)?;
    writer.flush()?;
    log::info!("Exported graph to {:?}.", filename.as_ref());
    Ok(())
}

pub fn write_graph<W: Write>(writer: &mut W, graph: &MatrixGraph) -> Result<(), Box<dyn Error>> {
    writeln!(writer, "# Lines starting with '#' are comments.")?;
    writeln!(writer)?;
    writeln!(writer, "# [VERTEX] LISTS")?;
    for vertex in graph.vertices() {
        let (x, y) = vertex.location();
        writeln!(
            writer,
            "[Vertex] {} {} {} {} {}",
            vertex.name(),
            vertex.id(),
            x,
            y,
            i64::from(vertex.attr())
        )?;
    }
    writeln!(writer)?;
    writeln!(writer, "# [EDGE] LISTS")?;
    for edge in graph.edges() {
        writeln!(writer, "[Edge] {} {} {}", edge.source(), edge.sink(), edge.cost())?;
    }
    Ok(())
}

#[cfg(test)]
mod test_graph_io {
    use super::*;

    const CITIES: &str = "\
# four cities
[Vertex] A 0 10 20 1
[Vertex] B 1 30 20
Vertex C 2 10 40 3

  [Edge] 0 1 5
Edge 0 2 3
[Edge] 1 2 2
[Edge] 1 3 1
[Edge] 2 3 4
[Edge] 2 3
[Vertex] D 3
";

    #[test]
    fn test_read() {
        let graph = read_graph(CITIES.as_bytes(), None).unwrap();
        assert_eq!(graph.n(), 4);
        assert_eq!(graph.m(), 5);
        assert_eq!(graph.weight(3.into(), 1.into()), 1);
        assert_eq!(graph.weight(0.into(), 3.into()), -1);

        let a = graph.vertex(0.into()).unwrap();
        assert_eq!(a.name(), "A");
        assert_eq!(a.location(), (10, 20));
        assert_eq!(a.attr(), Attribute::Place);
        assert_eq!(graph.vertex(1.into()).unwrap().attr(), Attribute::Empty);
        assert_eq!(graph.vertex(2.into()).unwrap().attr(), Attribute::Occupied);
        assert!(graph.vertex(3.into()).is_none());
    }

    #[test]
    fn test_fixed_capacity() {
        let graph = read_graph(CITIES.as_bytes(), Some(3)).unwrap();
        assert_eq!(graph.n(), 3);
        // Edges to node 3 are out of range.
        assert_eq!(graph.m(), 3);
    }

    #[test]
    fn test_bad_integer() {
        let err = read_graph("[Edge] 0 x 3\n".as_bytes(), None).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_huge_index() {
        let err = read_graph("[Edge] 0 5000000000 3\n".as_bytes(), None).unwrap_err();
        assert!(err.to_string().contains("line 1"));

        let text = format!("[Edge] 0 1 3\n\n[Edge] {} 0 3\n", i64::MAX);
        let err = read_graph(text.as_bytes(), None).unwrap_err();
        assert!(err.to_string().contains("line 3"));

        let graph = read_graph("[Edge] 0 5000000000 3\n".as_bytes(), Some(2)).unwrap();
        assert_eq!(graph.n(), 2);
        assert_eq!(graph.m(), 0);
    }

    #[test]
    fn test_inferred_size_limit() {
        let last = MAX_INFERRED_VERTICES as i64 - 1;
        let n = infer_vertices(&[(1, Record::Edge(0, last, 3))]).unwrap();
        assert_eq!(n, MAX_INFERRED_VERTICES);

        let too_big = infer_vertices(&[
            (1, Record::Edge(0, 2, 3)),
            (2, Record::Edge(last + 1, 0, 3)),
        ]);
        assert!(too_big.unwrap_err().to_string().contains("line 2"));

        let negative = read_graph("[Edge] -4 -2 3\n".as_bytes(), None).unwrap();
        assert_eq!(negative.n(), 0);
    }

    #[test]
    fn test_write_then_read() {
        let graph = read_graph(CITIES.as_bytes(), None).unwrap();
        let mut out: Vec<u8> = vec![];
        write_graph(&mut out, &graph).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("[Vertex] A 0 10 20 1"));
        assert!(text.contains("[Edge] 1 3 1"));

        let copy = read_graph(text.as_bytes(), Some(graph.n())).unwrap();
        assert_eq!(copy.m(), graph.m());
        for i in 0..4usize {
            for j in 0..4usize {
                assert_eq!(copy.weight(i.into(), j.into()), graph.weight(i.into(), j.into()));
            }
        }
    }
}
