use alloy::sol;

// Universal Router entry points and the v4 router parameter structs carried inside V4_SWAP.
sol! {
    /// Universal Router execution entry points.
    ///
    /// `commands` holds one tag byte per command, `inputs` the ABI-encoded
    /// parameters of each command in the same order.
    interface IUniversalRouter {
        function execute(bytes calldata commands, bytes[] calldata inputs) external payable;

        function execute(bytes calldata commands, bytes[] calldata inputs, uint256 deadline)
            external
            payable;
    }

    /// Identifies a v4 pool. `currency0 < currency1` always holds.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct PoolKey {
        address currency0;
        address currency1;
        uint24 fee;
        int24 tickSpacing;
        address hooks;
    }

    /// One hop of a v4 multihop path.
    #[derive(Debug, Default, PartialEq, Eq)]
    struct PathKey {
        address intermediateCurrency;
        uint24 fee;
        int24 tickSpacing;
        address hooks;
        bytes hookData;
    }

    #[derive(Debug, Default, PartialEq, Eq)]
    struct ExactInputSingleParams {
        PoolKey poolKey;
        bool zeroForOne;
        uint128 amountIn;
        uint128 amountOutMinimum;
        bytes hookData;
    }

    #[derive(Debug, Default, PartialEq, Eq)]
    struct ExactInputParams {
        address currencyIn;
        PathKey[] path;
        uint128 amountIn;
        uint128 amountOutMinimum;
    }
}
