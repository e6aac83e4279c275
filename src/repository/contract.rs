use alloy::sol;

// Token ABI used to describe route outputs
sol! {
    /// Metadata view functions of an ERC20 token.
    #[sol(rpc)]
    interface IERC20 {
        /// Returns the number of decimals used by the token.
        ///
        /// # Returns
        /// The number of decimals (e.g., 18 for most tokens, 6 for USDT/USDC)
        function decimals() external view returns (uint8);

        /// Returns the token symbol.
        function symbol() external view returns (string memory);
    }
}
