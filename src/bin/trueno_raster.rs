//! trueno-raster: rasterize lines, conics, curves, fills, hulls and
//! wireframes from the command line.
//!
//! Without `--output` the result is printed as coordinates, one per line.
//! With `--output` it is painted into a framebuffer and written as PNG.

#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use trueno_raster::mesh::load_points;
use trueno_raster::prelude::*;
use trueno_raster::render::{paint_pixels, paint_polyline, paint_samples, paint_spans};
use trueno_raster::transform::{self, wireframe};

/// trueno-raster: deterministic rasterization and geometry
#[derive(Parser, Debug)]
#[command(name = "trueno-raster")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Rasterization and computational-geometry kernel", long_about = None)]
struct Cli {
    /// Config file path (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Render to this PNG instead of printing coordinates
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Canvas width (overrides config)
    #[arg(long, global = true)]
    width: Option<u32>,

    /// Canvas height (overrides config)
    #[arg(long, global = true)]
    height: Option<u32>,

    /// Per-step trace output
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rasterize a segment
    Line {
        /// Start pixel as `x,y`
        #[arg(value_parser = parse_pixel)]
        from: Pixel,
        /// End pixel as `x,y`
        #[arg(value_parser = parse_pixel)]
        to: Pixel,
        /// dda, bresenham or wu
        #[arg(short, long, default_value = "bresenham")]
        algorithm: LineAlgorithm,
    },
    /// Rasterize a conic section
    Conic {
        /// Shape to draw
        #[arg(value_enum)]
        shape: ConicKind,
        /// Center (or parabola vertex) as `x,y`
        #[arg(value_parser = parse_pixel)]
        center: Pixel,
        /// Radius, or x semi-axis
        #[arg(short)]
        a: u32,
        /// y semi-axis (ellipse, hyperbola)
        #[arg(short, default_value_t = 0)]
        b: u32,
        /// Parabola focal parameter
        #[arg(short, default_value_t = 1.0)]
        p: f64,
        /// x extent for open conics (overrides config)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Sample a cubic curve through control points
    Curve {
        /// Control points as `x,y`
        #[arg(value_parser = parse_point, num_args = 4.., required = true)]
        control: Vec<Point>,
        /// bezier, hermite or bspline
        #[arg(short, long, default_value = "bezier")]
        basis: CurveBasis,
        /// Samples per segment (overrides config)
        #[arg(long)]
        steps: Option<usize>,
    },
    /// Fill a polygon
    Fill {
        /// Polygon vertices as `x,y`
        #[arg(value_parser = parse_point, num_args = 3.., required = true)]
        vertices: Vec<Point>,
        /// ordered, active, pixel-seed or scanline-seed
        #[arg(short, long, default_value = "ordered")]
        algorithm: String,
        /// Seed pixel for the flood algorithms
        #[arg(short, long, value_parser = parse_pixel)]
        seed: Option<Pixel>,
    },
    /// Convex hull of a point-list file
    Hull {
        /// File with one `x y` pair per line
        points: PathBuf,
        /// graham or jarvis
        #[arg(short, long, default_value = "graham")]
        algorithm: HullAlgorithm,
    },
    /// Delaunay triangulation of a point-list file
    Triangulate {
        /// File with one `x y` pair per line
        points: PathBuf,
        /// Emit finite Voronoi edges instead of triangles
        #[arg(long)]
        voronoi: bool,
    },
    /// Project a wireframe mesh
    Mesh {
        /// File with one `x y z` vertex per line
        file: PathBuf,
        /// cube, pyramid, tetrahedron or prism
        #[arg(short, long, default_value = "cube")]
        kind: MeshKind,
        /// Rotation about X in degrees
        #[arg(long, default_value_t = 0.0)]
        rotate_x: f64,
        /// Rotation about Y in degrees
        #[arg(long, default_value_t = 0.0)]
        rotate_y: f64,
        /// Rotation about Z in degrees
        #[arg(long, default_value_t = 0.0)]
        rotate_z: f64,
        /// Uniform scale
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
        /// Push the mesh along +z, in front of the camera
        #[arg(long, default_value_t = 10.0)]
        offset_z: f64,
        /// Projection distance (overrides config)
        #[arg(short, long)]
        distance: Option<f64>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ConicKind {
    Circle,
    Ellipse,
    Hyperbola,
    Parabola,
}

fn parse_pair<T: FromStr>(s: &str) -> std::result::Result<(T, T), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got {s:?}"))?;
    let x = x.trim().parse().map_err(|_| format!("bad x in {s:?}"))?;
    let y = y.trim().parse().map_err(|_| format!("bad y in {s:?}"))?;
    Ok((x, y))
}

fn parse_point(s: &str) -> std::result::Result<Point, String> {
    parse_pair::<f64>(s).map(Point::from)
}

fn parse_pixel(s: &str) -> std::result::Result<Pixel, String> {
    parse_pair::<i32>(s).map(Pixel::from)
}

/// Where results go: stdout coordinates or a framebuffer.
struct Output {
    canvas: Option<Framebuffer>,
}

impl Output {
    fn new(cli: &Cli, config: &Config) -> Result<Self> {
        let canvas = match cli.output {
            Some(_) => {
                let mut fb = Framebuffer::new(config.canvas.width, config.canvas.height)?;
                fb.clear(Rgba::WHITE);
                Some(fb)
            }
            None => None,
        };
        Ok(Self { canvas })
    }

    fn pixels(&mut self, pixels: impl IntoIterator<Item = Pixel>) {
        match &mut self.canvas {
            Some(fb) => {
                let n = paint_pixels(fb, pixels, Rgba::BLACK);
                log::debug!("painted {n} pixels");
            }
            None => {
                for p in pixels {
                    println!("{} {}", p.x, p.y);
                }
            }
        }
    }

    fn points(&mut self, points: &[Point]) {
        match &mut self.canvas {
            Some(fb) => paint_polyline(fb, points, LineAlgorithm::Bresenham, Rgba::BLACK),
            None => {
                for p in points {
                    println!("{} {}", p.x, p.y);
                }
            }
        }
    }

    fn lines(&mut self, lines: &[Line]) {
        for line in lines {
            match &mut self.canvas {
                Some(fb) => line.draw(fb, Rgba::BLACK),
                None => println!(
                    "{} {} {} {}",
                    line.start.x, line.start.y, line.end.x, line.end.y
                ),
            }
        }
    }

    fn finish(self, path: Option<&PathBuf>) -> Result<()> {
        if let (Some(fb), Some(path)) = (self.canvas, path) {
            let (min, max, mean) = fb.luminance_stats();
            log::debug!(
                "backend {:?}, luminance min {min:.1} max {max:.1} mean {mean:.1}",
                Framebuffer::backend()
            );
            PngEncoder::write_to_file(&fb, path)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::resolve(cli.config.as_deref())?;
    config.debug |= cli.debug;
    if let Some(w) = cli.width {
        config.canvas.width = w;
    }
    if let Some(h) = cli.height {
        config.canvas.height = h;
    }

    let default_level = if config.debug { "trace" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
    log::debug!("{config:?}");

    let mut out = Output::new(&cli, &config)?;
    run(&cli.command, &config, &mut out)?;
    out.finish(cli.output.as_ref())
}

fn run(command: &Command, config: &Config, out: &mut Output) -> Result<()> {
    match command {
        Command::Line {
            from,
            to,
            algorithm,
        } => {
            let raster = rasterize_line(*from, *to, *algorithm);
            match &mut out.canvas {
                Some(fb) => {
                    paint_samples(fb, raster, Rgba::BLACK);
                }
                None => {
                    for s in raster {
                        match s.intensity {
                            Some(i) => println!("{} {} {i:.3}", s.pixel.x, s.pixel.y),
                            None => println!("{} {}", s.pixel.x, s.pixel.y),
                        }
                    }
                }
            }
        }
        Command::Conic {
            shape,
            center,
            a,
            b,
            p,
            limit,
        } => {
            let shape = match shape {
                ConicKind::Circle => ConicShape::Circle { r: *a },
                ConicKind::Ellipse => ConicShape::Ellipse { a: *a, b: *b },
                ConicKind::Hyperbola => ConicShape::Hyperbola {
                    a: *a,
                    b: *b,
                    x_limit: limit.unwrap_or(config.conics.hyperbola_limit),
                },
                ConicKind::Parabola => ConicShape::Parabola {
                    p: *p,
                    x_limit: limit.unwrap_or(config.conics.parabola_limit),
                },
            };
            out.pixels(rasterize_conic(*center, shape));
        }
        Command::Curve {
            control,
            basis,
            steps,
        } => {
            let samples: Vec<Point> =
                sample_curve(control, *basis, steps.unwrap_or(config.curves.steps)).collect();
            if samples.is_empty() {
                bail!("{basis} needs at least 4 control points");
            }
            out.points(&samples);
        }
        Command::Fill {
            vertices,
            algorithm,
            seed,
        } => {
            let algorithm = FillAlgorithm::from_name(algorithm, *seed)?;
            let polygon = Polygon::new(vertices.clone());
            let raster = fill(&polygon, algorithm, config.canvas.bounds())?;
            match &mut out.canvas {
                Some(fb) => {
                    let n = paint_spans(fb, raster, Rgba::BLUE);
                    log::debug!("painted {n} spans");
                }
                None => {
                    for span in raster {
                        println!("{} {} {}", span.y, span.x_start, span.x_end);
                    }
                }
            }
        }
        Command::Hull { points, algorithm } => {
            let points = load_points(points)?;
            let mut hull = convex_hull(&points, *algorithm);
            if hull.is_empty() {
                log::warn!("{} points have no hull", points.len());
                return Ok(());
            }
            if out.canvas.is_some() {
                hull.push(hull[0]);
            }
            out.points(&hull);
        }
        Command::Triangulate { points, voronoi } => {
            let points = load_points(points)?;
            if *voronoi {
                out.lines(&voronoi_edges(&points));
            } else {
                let edges: BTreeSet<(usize, usize)> =
                    delaunay(&points).iter().flat_map(|t| t.edges()).collect();
                let lines: Vec<Line> = edges
                    .into_iter()
                    .map(|(i, j)| Line::new(points[i], points[j]))
                    .collect();
                out.lines(&lines);
            }
        }
        Command::Mesh {
            file,
            kind,
            rotate_x,
            rotate_y,
            rotate_z,
            scale,
            offset_z,
            distance,
        } => {
            let mesh = Mesh::load(file, *kind)?;
            let placement = mesh_placement(*scale, [*rotate_x, *rotate_y, *rotate_z], *offset_z);
            let d = distance.unwrap_or(config.projection.distance);
            let viewport = Viewport::new(config.canvas.width, config.canvas.height);
            out.lines(&wireframe(&mesh, &placement.current(), d, viewport));
        }
    }
    Ok(())
}

/// Scale, then rotate about x, y and z (degrees), then push the mesh
/// `offset_z` units in front of the camera.
fn mesh_placement(scale: f64, [rx, ry, rz]: [f64; 3], offset_z: f64) -> TransformAccumulator {
    let mut acc = TransformAccumulator::new();
    // The last delta pushed touches the mesh first.
    acc.push(transform::translation(0.0, 0.0, offset_z))
        .push(transform::rotation_z(rz.to_radians()))
        .push(transform::rotation_y(ry.to_radians()))
        .push(transform::rotation_x(rx.to_radians()))
        .push(transform::scale(scale, scale, scale));
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_pixel_and_point() {
        assert_eq!(parse_pixel("3,-4").unwrap(), Pixel::new(3, -4));
        assert_eq!(parse_point(" 1.5, 2 ").unwrap(), Point::new(1.5, 2.0));
        assert!(parse_pixel("3").is_err());
        assert!(parse_pixel("a,1").is_err());
        assert!(parse_pixel("1.5,2").is_err());
    }

    #[test]
    fn test_mesh_placement_keeps_object_in_front() {
        let acc = mesh_placement(2.0, [30.0, 45.0, 60.0], 10.0);
        let moved = acc.apply(&[Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 1.0)]);
        // The mesh origin lands on the camera axis at the offset.
        assert!(moved[0].x.abs() < 1e-12 && moved[0].y.abs() < 1e-12);
        assert!((moved[0].z - 10.0).abs() < 1e-12);
        // Rotation never changes the scaled distance from the origin.
        let (a, b) = (moved[0], moved[1]);
        let len = ((b.x - a.x).powi(2) + (b.y - a.y).powi(2) + (b.z - a.z).powi(2)).sqrt();
        assert!((len - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_mesh_placement_scales_before_translating() {
        let acc = mesh_placement(3.0, [0.0, 0.0, 0.0], 10.0);
        let p = acc.apply(&[Point3::new(1.0, 1.0, 1.0)])[0];
        assert!((p.x - 3.0).abs() < 1e-12 && (p.y - 3.0).abs() < 1e-12);
        assert!((p.z - 13.0).abs() < 1e-12);
    }
}
