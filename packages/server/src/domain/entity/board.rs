//! Board エンティティ
//!
//! 純粋な値型で、並行性の考慮は持ちません。排他制御は GameSession を
//! 保持するレイヤの責務です。

use crate::domain::{
    error::SessionError,
    value_object::{Cell, Mark},
};

/// 行数・列数の上限
///
/// 盤面はクライアントが指定した寸法で即座に確保されるため、上限なしでは
/// 1 回の参加要求で任意の量のメモリを確保できてしまう。
pub const MAX_DIMENSION: usize = 100;

/// rows × cols の盤面
///
/// 不変条件: 行数は常に rows、各行の長さは常に cols。
/// 寸法は作成時に固定され、以後変わらない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Cell>>,
}

impl Board {
    /// 全マスが Empty の盤面を作成（1 <= rows, cols <= MAX_DIMENSION）
    pub fn new(rows: usize, cols: usize) -> Result<Self, SessionError> {
        if rows == 0 || cols == 0 || rows > MAX_DIMENSION || cols > MAX_DIMENSION {
            return Err(SessionError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![vec![Cell::Empty; cols]; rows],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// 指定マスの状態（範囲外は None）
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// 盤面全体のコピーを返す（スナップショット用）
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        self.cells.clone()
    }

    /// 空きマスに印を置く
    ///
    /// 範囲外は CellOutOfBounds、既に埋まっているマスは CellOccupied。
    /// どちらの場合も盤面は変更されない。
    pub fn place(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), SessionError> {
        match self.cell(row, col) {
            None => Err(SessionError::CellOutOfBounds { row, col }),
            Some(Cell::Empty) => {
                self.cells[row][col] = mark.cell();
                Ok(())
            }
            Some(_) => Err(SessionError::CellOccupied { row, col }),
        }
    }
}
