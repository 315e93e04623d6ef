//! SVG grid model. Cells are addressed by `(row, col)`, one `<rect>` each.

use std::fmt::Write as _;

use thiserror::Error;

use super::color::Palette;
use super::config::{Geometry, MAX_GRID_CELLS};
use crate::error::LoaderError;

#[derive(Debug, Error)]
#[error("no cell ({row},{col}) in the {rows}x{cols} grid")]
pub struct PaintError {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

#[derive(Clone, Debug)]
pub struct SvgGrid {
    geometry: Geometry,
    /// Outline color for every rect.
    stroke: String,
    fills: Vec<String>,
}

impl SvgGrid {
    /// Every cell starts with the dead fill.
    pub fn new(geometry: Geometry, dead_fill: &str) -> Result<Self, LoaderError> {
        let cells = geometry
            .rows
            .checked_mul(geometry.cols)
            .filter(|&cells| cells <= MAX_GRID_CELLS)
            .ok_or(LoaderError::GridTooLarge {
                rows: geometry.rows as f64,
                cols: geometry.cols as f64,
                max: MAX_GRID_CELLS,
            })?;
        Ok(Self {
            geometry,
            stroke: dead_fill.to_string(),
            fills: vec![dead_fill.to_string(); cells],
        })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn fill(&self, row: usize, col: usize) -> Option<&str> {
        self.index(row, col).map(|i| self.fills[i].as_str())
    }

    pub fn paint(
        &mut self,
        row: usize,
        col: usize,
        value: u8,
        palette: &mut Palette,
    ) -> Result<(), PaintError> {
        let i = self.index(row, col).ok_or(PaintError {
            row,
            col,
            rows: self.geometry.rows,
            cols: self.geometry.cols,
        })?;
        self.fills[i] = palette.fill_for(value);
        Ok(())
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.geometry.rows && col < self.geometry.cols)
            .then(|| row * self.geometry.cols + col)
    }

    pub fn to_svg(&self) -> String {
        let Geometry {
            rows,
            cols,
            height,
            width,
            cell_size_r,
            cell_size_c,
        } = self.geometry;

        let mut out = String::with_capacity(128 + rows * cols * 96);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" height="{height}" width="{width}" viewBox="0 0 {width} {height}">"#
        );
        for row in 0..rows {
            for col in 0..cols {
                let fill = &self.fills[row * cols + col];
                let _ = write!(
                    out,
                    r#"<rect x="{x}" y="{y}" width="{cell_size_c}" height="{cell_size_r}" fill="{fill}" stroke="{stroke}"/>"#,
                    x = col as f64 * cell_size_c,
                    y = row as f64 * cell_size_r,
                    stroke = self.stroke,
                );
            }
        }
        out.push_str("</svg>");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::SvgGrid;
    use crate::error::LoaderError;
    use crate::loader::color::{FixedColor, Palette};
    use crate::loader::config::Geometry;

    fn geometry(rows: usize, cols: usize) -> Geometry {
        Geometry {
            rows,
            cols,
            height: rows as f64 * 10.0,
            width: cols as f64 * 5.0,
            cell_size_r: 10.0,
            cell_size_c: 5.0,
        }
    }

    fn palette() -> Palette {
        Palette::new(Box::new(FixedColor("#123456".into())), "#ffffff")
    }

    #[test]
    fn new_grid_is_dead() {
        let grid = SvgGrid::new(geometry(2, 3), "#ffffff").unwrap();
        for row in 0..2 {
            for col in 0..3 {
                assert_eq!(grid.fill(row, col), Some("#ffffff"));
            }
        }
        assert_eq!(grid.fill(2, 0), None);
    }

    #[test]
    fn paint_updates_one_cell() {
        let mut grid = SvgGrid::new(geometry(2, 3), "#ffffff").unwrap();
        let mut palette = palette();
        grid.paint(1, 2, 1, &mut palette).unwrap();
        assert_eq!(grid.fill(1, 2), Some("#123456"));
        assert_eq!(grid.fill(1, 1), Some("#ffffff"));

        grid.paint(1, 2, 0, &mut palette).unwrap();
        assert_eq!(grid.fill(1, 2), Some("#ffffff"));
    }

    #[test]
    fn paint_outside_grid_fails() {
        let mut grid = SvgGrid::new(geometry(2, 3), "#ffffff").unwrap();
        let err = grid.paint(0, 3, 1, &mut palette()).unwrap_err();
        assert_eq!((err.row, err.col, err.rows, err.cols), (0, 3, 2, 3));
    }

    #[test]
    fn oversized_geometry_is_rejected() {
        let err = SvgGrid::new(geometry(usize::MAX, 2), "#ffffff").unwrap_err();
        assert!(matches!(err, LoaderError::GridTooLarge { cols, .. } if cols == 2.0));
    }

    #[test]
    fn markup_places_rects_by_row_and_col() {
        let mut grid = SvgGrid::new(geometry(2, 2), "#ffffff").unwrap();
        grid.paint(1, 0, 1, &mut palette()).unwrap();
        let svg = grid.to_svg();

        assert!(svg.starts_with("<svg "));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(r#"viewBox="0 0 10 20""#), "{svg}");
        assert_eq!(svg.matches("<rect ").count(), 4);
        assert!(
            svg.contains(r##"<rect x="0" y="10" width="5" height="10" fill="#123456""##),
            "{svg}"
        );
        assert!(svg.contains(r##"<rect x="5" y="0" width="5" height="10" fill="#ffffff""##));
    }
}
