use thiserror::Error;
use tracing::warn;

use crate::types::*;

/// The 8x8 mailbox. Index with `sq = rank * 8 + file`.
pub type Board = [Option<Piece>; 64];

/// Moves kept in the undo log. Exceeding this stops recording, not the game.
pub const MAX_GAME_HISTORY: usize = 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("expected at least 4 FEN fields, found {0}")]
    MissingFields(usize),
    #[error("board field must list 8 ranks, found {0}")]
    BadRankCount(usize),
    #[error("rank '{0}' does not describe 8 files")]
    BadRank(String),
    #[error("invalid piece character '{0}'")]
    BadPiece(char),
    #[error("invalid side to move '{0}'")]
    BadSideToMove(String),
    #[error("invalid castling character '{0}'")]
    BadCastling(char),
    #[error("invalid en-passant square '{0}'")]
    BadEnPassant(String),
    #[error("invalid halfmove clock '{0}'")]
    BadHalfmoveClock(String),
}

/// Everything needed to reverse one applied move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Undo {
    /// The mover as it stood before the move, original `has_moved` included.
    pub moved: Piece,
    /// Piece that occupied the destination square (not the en-passant victim).
    pub captured: Option<Piece>,
    /// Rook relocation (from, to) when the move was a castle.
    pub rook_hop: Option<(u8, u8)>,
    /// Square and piece of a pawn removed by en passant.
    pub ep_capture: Option<(u8, Piece)>,
    pub prev_en_passant: Option<u8>,
    pub prev_halfmove_clock: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub mv: Move,
    pub undo: Undo,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub side_to_move: Color,
    /// Square a double-pushed pawn skipped over, capturable en passant.
    pub en_passant: Option<u8>,
    /// Halfmoves since the last capture or pawn push (50-move rule).
    pub halfmove_clock: u32,
    history: Vec<HistoryEntry>,
}

impl Position {
    /// Standard starting position.
    pub fn new() -> Self {
        let mut p = Position {
            board: [None; 64],
            side_to_move: Color::White,
            en_passant: None,
            halfmove_clock: 0,
            history: Vec::new(),
        };

        for f in 0..8 {
            p.board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            p.board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
        }
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            p.board[f] = Some(Piece::new(Color::White, kind));
            p.board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        p
    }

    /// Forsyth-Edwards Notation parser used by tests and diagnostics.
    ///
    /// `has_moved` flags cannot be read out of a FEN string directly; they are
    /// reconstructed from the castling field (a missing right marks the
    /// corresponding rook moved, both rights missing mark the king moved).
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::MissingFields(parts.len()));
        }

        let mut board: Board = [None; 64];
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::BadRankCount(ranks.len()));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank: i8 = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let color = if ch.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = match ch.to_ascii_lowercase() {
                        'p' => PieceKind::Pawn,
                        'n' => PieceKind::Knight,
                        'b' => PieceKind::Bishop,
                        'r' => PieceKind::Rook,
                        'q' => PieceKind::Queen,
                        'k' => PieceKind::King,
                        _ => return Err(FenError::BadPiece(ch)),
                    };
                    match sq(file, rank) {
                        Some(s) => board[s as usize] = Some(Piece::new(color, kind)),
                        None => return Err(FenError::BadRank(rank_str.to_string())),
                    }
                    file += 1;
                }
                if file > 8 {
                    return Err(FenError::BadRank(rank_str.to_string()));
                }
            }
            if file != 8 {
                return Err(FenError::BadRank(rank_str.to_string()));
            }
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::BadSideToMove(other.to_string())),
        };

        let (mut wk, mut wq, mut bk, mut bq) = (false, false, false, false);
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => wk = true,
                    'Q' => wq = true,
                    'k' => bk = true,
                    'q' => bq = true,
                    _ => return Err(FenError::BadCastling(c)),
                }
            }
        }
        mark_castling_flags(&mut board, Color::White, wk, wq);
        mark_castling_flags(&mut board, Color::Black, bk, bq);

        let en_passant = if parts[3] == "-" {
            None
        } else {
            match coord_to_sq(parts[3]) {
                Some(s) => Some(s),
                None => return Err(FenError::BadEnPassant(parts[3].to_string())),
            }
        };

        let halfmove_clock: u32 = match parts.get(4) {
            Some(s) => s
                .parse()
                .map_err(|_| FenError::BadHalfmoveClock(s.to_string()))?,
            None => 0,
        };

        Ok(Position {
            board,
            side_to_move,
            en_passant,
            halfmove_clock,
            history: Vec::new(),
        })
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }

    pub fn set_piece(&mut self, sq: u8, pc: Option<Piece>) {
        self.board[sq as usize] = pc;
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        for i in 0..64u8 {
            if let Some(pc) = self.piece_at(i) {
                if pc.color == c && pc.kind == PieceKind::King {
                    return Some(i);
                }
            }
        }
        None
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Applies `mv` in place and returns the record needed to reverse it.
    ///
    /// The caller is responsible for legality; `make_move` trusts the move and
    /// only derives the special-move effects (castling rook hop, en-passant
    /// removal, promotion, en-passant target, halfmove clock, side to move).
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let moved = self.piece_at(mv.from).expect("no piece on from-square");
        let captured = self.piece_at(mv.to);
        let prev_en_passant = self.en_passant;
        let prev_halfmove_clock = self.halfmove_clock;

        let mut reset_clock = moved.kind == PieceKind::Pawn || captured.is_some();

        // En-passant capture: a pawn moving diagonally onto the empty target
        // square removes the pawn beside it (same rank as the mover).
        let mut ep_capture = None;
        if moved.kind == PieceKind::Pawn
            && captured.is_none()
            && file_of(mv.to) != file_of(mv.from)
            && self.en_passant == Some(mv.to)
        {
            if let Some(victim_sq) = sq(file_of(mv.to), rank_of(mv.from)) {
                if let Some(victim) = self.piece_at(victim_sq) {
                    self.set_piece(victim_sq, None);
                    ep_capture = Some((victim_sq, victim));
                    reset_clock = true;
                }
            }
        }

        let mut mover = moved;
        mover.has_moved = true;
        if moved.kind == PieceKind::Pawn && rank_of(mv.to) == promo_rank(moved.color) {
            mover.kind = mv.promo.unwrap_or(PieceKind::Queen);
        }
        self.set_piece(mv.from, None);
        self.set_piece(mv.to, Some(mover));

        // Castling: a king sliding two files drags its rook over.
        let mut rook_hop = None;
        if moved.kind == PieceKind::King && (file_of(mv.to) - file_of(mv.from)).abs() == 2 {
            let rank = rank_of(mv.from);
            let (rook_from_file, rook_to_file) = if file_of(mv.to) > file_of(mv.from) {
                (7, 5)
            } else {
                (0, 3)
            };
            if let (Some(rf), Some(rt)) = (sq(rook_from_file, rank), sq(rook_to_file, rank)) {
                if let Some(mut rook) = self.piece_at(rf) {
                    rook.has_moved = true;
                    self.set_piece(rf, None);
                    self.set_piece(rt, Some(rook));
                    rook_hop = Some((rf, rt));
                }
            }
        }

        self.en_passant = None;
        if moved.kind == PieceKind::Pawn && (rank_of(mv.to) - rank_of(mv.from)).abs() == 2 {
            let skipped = (rank_of(mv.from) + rank_of(mv.to)) / 2;
            self.en_passant = sq(file_of(mv.from), skipped);
        }

        self.halfmove_clock = if reset_clock {
            0
        } else {
            self.halfmove_clock + 1
        };
        self.side_to_move = self.side_to_move.other();

        Undo {
            moved,
            captured,
            rook_hop,
            ep_capture,
            prev_en_passant,
            prev_halfmove_clock,
        }
    }

    /// Exact inverse of `make_move`. Records must be consumed in LIFO order.
    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.en_passant = undo.prev_en_passant;
        self.halfmove_clock = undo.prev_halfmove_clock;

        if let Some((rf, rt)) = undo.rook_hop {
            // Castling required an unmoved rook, so the pre-move flag is known.
            if let Some(mut rook) = self.piece_at(rt) {
                rook.has_moved = false;
                self.set_piece(rt, None);
                self.set_piece(rf, Some(rook));
            }
        }

        self.set_piece(mv.from, Some(undo.moved));
        self.set_piece(mv.to, undo.captured);

        if let Some((victim_sq, victim)) = undo.ep_capture {
            self.set_piece(victim_sq, Some(victim));
        }
    }

    /// Collaborator-facing move application: plays the move and records it in
    /// the bounded undo log. A full log drops the record with a warning rather
    /// than rejecting the move.
    pub fn apply_move(&mut self, from: u8, to: u8, promo: Option<PieceKind>) {
        let mv = Move { from, to, promo };
        let undo = self.make_move(mv);
        if self.history.len() < MAX_GAME_HISTORY {
            self.history.push(HistoryEntry { mv, undo });
        } else {
            warn!(%mv, "move history full; move applied but not recorded for undo");
        }
    }

    /// Reverses the most recent `apply_move`. Returns false on empty history.
    pub fn undo_last_move(&mut self) -> bool {
        match self.history.pop() {
            Some(entry) => {
                self.unmake_move(entry.mv, entry.undo);
                true
            }
            None => false,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn promo_rank(c: Color) -> i8 {
    match c {
        Color::White => 7,
        Color::Black => 0,
    }
}

fn mark_castling_flags(board: &mut Board, color: Color, kingside: bool, queenside: bool) {
    let rank: i8 = match color {
        Color::White => 0,
        Color::Black => 7,
    };
    let mut mark = |file: i8, kind: PieceKind| {
        if let Some(s) = sq(file, rank) {
            if let Some(pc) = &mut board[s as usize] {
                if pc.color == color && pc.kind == kind {
                    pc.has_moved = true;
                }
            }
        }
    };
    if !kingside {
        mark(7, PieceKind::Rook);
    }
    if !queenside {
        mark(0, PieceKind::Rook);
    }
    if !kingside && !queenside {
        mark(4, PieceKind::King);
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
