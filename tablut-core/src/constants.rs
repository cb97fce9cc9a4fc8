//! 规则常量定义

use crate::square::Square;

/// 棋盘边长（行数与列数相同）
pub const BOARD_SIZE: usize = 9;

/// 棋盘格子总数
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 王座（中心格）
pub const THRONE: Square = Square::new_unchecked(4, 4);

/// 王座北侧
pub const NTHRONE: Square = Square::new_unchecked(4, 5);

/// 王座南侧
pub const STHRONE: Square = Square::new_unchecked(4, 3);

/// 王座西侧
pub const WTHRONE: Square = Square::new_unchecked(3, 4);

/// 王座东侧
pub const ETHRONE: Square = Square::new_unchecked(5, 4);

/// 环绕王座的四个格子
pub const THRONE_RING: [Square; 4] = [NTHRONE, ETHRONE, STHRONE, WTHRONE];

/// 攻方（黑方）初始位置
pub const INITIAL_ATTACKERS: [Square; 16] = [
    Square::new_unchecked(0, 3),
    Square::new_unchecked(0, 4),
    Square::new_unchecked(0, 5),
    Square::new_unchecked(1, 4),
    Square::new_unchecked(8, 3),
    Square::new_unchecked(8, 4),
    Square::new_unchecked(8, 5),
    Square::new_unchecked(7, 4),
    Square::new_unchecked(3, 0),
    Square::new_unchecked(4, 0),
    Square::new_unchecked(5, 0),
    Square::new_unchecked(4, 1),
    Square::new_unchecked(3, 8),
    Square::new_unchecked(4, 8),
    Square::new_unchecked(5, 8),
    Square::new_unchecked(4, 7),
];

/// 守方（白方）初始位置，不含国王
pub const INITIAL_DEFENDERS: [Square; 8] = [
    NTHRONE,
    ETHRONE,
    STHRONE,
    WTHRONE,
    Square::new_unchecked(4, 6),
    Square::new_unchecked(4, 2),
    Square::new_unchecked(2, 4),
    Square::new_unchecked(6, 4),
];
