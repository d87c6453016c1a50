//! GameSession エンティティとターン進行ロジック
//!
//! 1 つのゲームの全状態（盤面、スロット割り当て、手番）を保持します。
//! ここでの操作は全て同期的な純粋ロジックで、副作用を持ちません。
//! 排他制御は SessionRegistry がセッション単位のロックで保証します。

use crate::domain::{
    entity::board::Board,
    error::SessionError,
    value_object::{Cell, ConnectionId, GameId, Mark, PlayerRole, Timestamp},
};

/// 1 つの進行中ゲーム
///
/// スロットは切断で空くが、セッション自体はプロセスが生きている限り
/// 破棄されない（リソースが単調増加する点は意図した簡略化）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub id: GameId,
    pub board: Board,
    /// 次に着手できる印。X から始まる。
    pub active_mark: Mark,
    /// X スロットを占有している接続
    pub slot_x: Option<ConnectionId>,
    /// O スロットを占有している接続
    pub slot_o: Option<ConnectionId>,
    pub created_at: Timestamp,
}

/// セッション状態の不変コピー
///
/// ロックを持たずにコンポーネント境界を越えて受け渡してよい。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub id: GameId,
    pub rows: usize,
    pub cols: usize,
    pub board: Vec<Vec<Cell>>,
    pub active_mark: Mark,
    pub slot_x: Option<ConnectionId>,
    pub slot_o: Option<ConnectionId>,
    pub created_at: Timestamp,
}

impl GameSession {
    /// 空の盤面を持つ新しいセッションを作成
    pub fn new(
        id: GameId,
        rows: usize,
        cols: usize,
        created_at: Timestamp,
    ) -> Result<Self, SessionError> {
        let board = Board::new(rows, cols)?;
        Ok(Self {
            id,
            board,
            active_mark: Mark::X,
            slot_x: None,
            slot_o: None,
            created_at,
        })
    }

    /// 現在の状態の不変コピーを取る
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id.clone(),
            rows: self.board.rows(),
            cols: self.board.cols(),
            board: self.board.to_cells(),
            active_mark: self.active_mark,
            slot_x: self.slot_x.clone(),
            slot_o: self.slot_o.clone(),
            created_at: self.created_at,
        }
    }

    /// 接続が占有している印を解決する
    pub fn mark_of(&self, connection_id: &ConnectionId) -> Option<Mark> {
        if self.slot_x.as_ref() == Some(connection_id) {
            Some(Mark::X)
        } else if self.slot_o.as_ref() == Some(connection_id) {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// 要求された役割のスロットに接続を割り当てる
    ///
    /// 空いていないスロットへの要求は SlotTaken、既にもう一方のスロットを
    /// 占有している接続の要求は AlreadySeated で失敗し、どちらの場合も
    /// 状態は一切変更されない（1 接続が同時に持てるスロットは高々 1 つ）。
    /// 観戦者はスロットに触れず常に成功する。
    pub fn occupy_slot(
        &mut self,
        role: PlayerRole,
        connection_id: ConnectionId,
    ) -> Result<(), SessionError> {
        let Some(mark) = role.mark() else {
            return Ok(());
        };

        if self.mark_of(&connection_id).is_some() {
            return Err(SessionError::AlreadySeated);
        }

        let slot = match mark {
            Mark::X => &mut self.slot_x,
            Mark::O => &mut self.slot_o,
        };
        if slot.is_some() {
            return Err(SessionError::SlotTaken(role));
        }
        *slot = Some(connection_id);
        Ok(())
    }

    /// 接続が占有しているスロットを空ける
    ///
    /// 盤面と手番はそのまま残るので、後から join した接続が同じ局面を
    /// 引き継いでプレイを再開できる。
    pub fn vacate_slots(&mut self, connection_id: &ConnectionId) {
        if self.slot_x.as_ref() == Some(connection_id) {
            self.slot_x = None;
        }
        if self.slot_o.as_ref() == Some(connection_id) {
            self.slot_o = None;
        }
    }

    /// 着手を検証して適用し、手番を進める
    ///
    /// 判断に使う状態（接続の印、手番）は全てこの中で読み直す。
    /// 埋まっているマスへの着手は手番を消費せずに拒否する。
    pub fn apply_move(
        &mut self,
        connection_id: &ConnectionId,
        row: usize,
        col: usize,
    ) -> Result<(), SessionError> {
        let mark = self
            .mark_of(connection_id)
            .ok_or(SessionError::NotParticipant)?;

        if self.active_mark != mark {
            return Err(SessionError::NotYourTurn);
        }

        self.board.place(row, col, mark)?;
        self.active_mark = mark.opponent();

        Ok(())
    }
}
