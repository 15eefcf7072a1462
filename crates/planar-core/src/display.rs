use std::fmt::{self, Write};

use crate::dtype::WithDType;
use crate::plane::Plane;

/// Configuration for diagnostic dumps of a tensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// Digits after the decimal point; `None` uses the element's Display.
    pub precision: Option<usize>,
    /// Maximum number of channel planes to print (the rest are elided).
    pub max_planes: usize,
    /// Maximum number of printed lines per plane.
    pub max_rows: usize,
    /// Print logical rows; when false each printed line is one physical
    /// column, i.e. the plane as it sits in memory.
    pub row_major: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            precision: Some(4),
            max_planes: 8,
            max_rows: 16,
            row_major: true,
        }
    }
}

impl PrintOptions {
    pub fn precision(mut self, p: usize) -> Self {
        self.precision = Some(p);
        self
    }

    /// Print elements with their own Display impl (no rounding).
    pub fn exact(mut self) -> Self {
        self.precision = None;
        self
    }

    pub fn max_planes(mut self, n: usize) -> Self {
        self.max_planes = n;
        self
    }

    pub fn max_rows(mut self, n: usize) -> Self {
        self.max_rows = n;
        self
    }

    pub fn row_major(mut self, row_major: bool) -> Self {
        self.row_major = row_major;
        self
    }
}

fn write_value<W: Write, T: WithDType>(out: &mut W, v: T, opts: &PrintOptions) -> fmt::Result {
    match opts.precision {
        Some(p) if T::DTYPE.is_float() => write!(out, " {:>w$.p$}", v, w = p + 4, p = p),
        _ => write!(out, " {:>6}", v),
    }
}

/// Render planes one after another, each as "Channel: i" followed by its
/// rows (or its columns when `opts.row_major` is false).
pub(crate) fn render_planes<'a, W: Write, T: WithDType>(
    out: &mut W,
    planes: impl Iterator<Item = Plane<'a, T>>,
    channels: usize,
    opts: &PrintOptions,
) -> fmt::Result {
    for (i, plane) in planes.enumerate().take(opts.max_planes) {
        writeln!(out, "Channel: {}", i)?;
        let (lines, unit) = if opts.row_major {
            (plane.to_rows(), "rows")
        } else {
            (plane.to_cols(), "columns")
        };
        for line in lines.iter().take(opts.max_rows) {
            for &v in line {
                write_value(out, v, opts)?;
            }
            writeln!(out)?;
        }
        if lines.len() > opts.max_rows {
            writeln!(out, " ... {} more {}", lines.len() - opts.max_rows, unit)?;
        }
    }
    if channels > opts.max_planes {
        writeln!(out, "... {} more channels", channels - opts.max_planes)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PlaneLayout;

    fn render<'a, T: WithDType>(
        planes: impl Iterator<Item = Plane<'a, T>>,
        channels: usize,
        opts: &PrintOptions,
    ) -> String {
        let mut out = String::new();
        render_planes(&mut out, planes, channels, opts).unwrap();
        out
    }

    #[test]
    fn test_render_float_precision() {
        let data = [1.0f32, 3.0, 2.0, 4.0];
        let plane = Plane::new(&data, PlaneLayout::new(2, 2));
        let s = render(std::iter::once(plane), 1, &PrintOptions::default().precision(1));
        assert_eq!(s, "Channel: 0\n   1.0   2.0\n   3.0   4.0\n");
    }

    #[test]
    fn test_render_physical_columns() {
        // Logical [[1, 2, 3], [4, 5, 6]], stored column by column.
        let data = [1i32, 4, 2, 5, 3, 6];
        let plane = Plane::new(&data, PlaneLayout::new(2, 3));
        let opts = PrintOptions::default().row_major(false).max_rows(2);
        let s = render(std::iter::once(plane), 1, &opts);
        assert_eq!(
            s,
            "Channel: 0\n      1      4\n      2      5\n ... 1 more columns\n"
        );
    }

    #[test]
    fn test_render_elides_rows_and_channels() {
        let data = [0i32; 3];
        let plane = Plane::new(&data, PlaneLayout::new(3, 1));
        let opts = PrintOptions::default().max_rows(1).max_planes(1);
        let s = render(vec![plane, plane].into_iter(), 2, &opts);
        assert_eq!(
            s,
            "Channel: 0\n      0\n ... 2 more rows\n... 1 more channels\n"
        );
    }
}
