use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Creation and update timestamps shared by every table.
fn timestamps(table: &mut TableCreateStatement, created: impl IntoIden, updated: impl IntoIden) {
    table
        .col(
            ColumnDef::new(created)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(updated)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        );
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    #[allow(clippy::too_many_lines)]
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Catalog tables
        let mut tags = Table::create()
            .table(Tags::Table)
            .if_not_exists()
            .col(ColumnDef::new(Tags::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Tags::Tag).string().not_null().unique_key())
            .to_owned();
        timestamps(&mut tags, Tags::CreatedAt, Tags::LastUpdated);
        manager.create_table(tags).await?;

        let mut authors = Table::create()
            .table(Authors::Table)
            .if_not_exists()
            .col(ColumnDef::new(Authors::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Authors::Name).string().not_null())
            .col(ColumnDef::new(Authors::Email).string().not_null().unique_key())
            .col(ColumnDef::new(Authors::Affiliation).string().not_null())
            .col(ColumnDef::new(Authors::Orcid).string_len(32).unique_key())
            .to_owned();
        timestamps(&mut authors, Authors::CreatedAt, Authors::LastUpdated);
        manager.create_table(authors).await?;

        let mut institutions = Table::create()
            .table(Institutions::Table)
            .if_not_exists()
            .col(ColumnDef::new(Institutions::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Institutions::Name).string().not_null())
            .col(
                ColumnDef::new(Institutions::SignedMaster)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .to_owned();
        timestamps(&mut institutions, Institutions::CreatedAt, Institutions::LastUpdated);
        manager.create_table(institutions).await?;

        let mut organisms = Table::create()
            .table(Organisms::Table)
            .if_not_exists()
            .col(ColumnDef::new(Organisms::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Organisms::Name).string().not_null())
            .col(ColumnDef::new(Organisms::Description).text().not_null())
            .col(ColumnDef::new(Organisms::Genotype).string().not_null())
            .to_owned();
        timestamps(&mut organisms, Organisms::CreatedAt, Organisms::LastUpdated);
        manager.create_table(organisms).await?;

        let mut parts = Table::create()
            .table(Parts::Table)
            .if_not_exists()
            .col(ColumnDef::new(Parts::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Parts::Name).string().not_null())
            .col(ColumnDef::new(Parts::Description).text())
            .col(ColumnDef::new(Parts::GeneId).string().not_null())
            .col(ColumnDef::new(Parts::PartType).string_len(32).not_null())
            .col(ColumnDef::new(Parts::Status).string_len(32))
            .col(ColumnDef::new(Parts::OriginalSequence).text())
            .col(ColumnDef::new(Parts::OptimizedSequence).text())
            .col(ColumnDef::new(Parts::SynthesizedSequence).text())
            .col(ColumnDef::new(Parts::FullSequence).text())
            .col(ColumnDef::new(Parts::Genbank).json())
            .col(ColumnDef::new(Parts::Vector).string())
            .col(ColumnDef::new(Parts::PrimerForward).text())
            .col(ColumnDef::new(Parts::PrimerReverse).text())
            .col(ColumnDef::new(Parts::Barcode).string())
            .col(ColumnDef::new(Parts::Translation).text())
            .col(ColumnDef::new(Parts::IpCheck).boolean().not_null().default(false))
            .col(ColumnDef::new(Parts::IpCheckDate).timestamp_with_time_zone())
            .col(ColumnDef::new(Parts::IpCheckRef).string())
            .col(ColumnDef::new(Parts::AuthorId).uuid())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_parts_author_id")
                    .from(Parts::Table, Parts::AuthorId)
                    .to(Authors::Table, Authors::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .on_update(ForeignKeyAction::NoAction),
            )
            .to_owned();
        timestamps(&mut parts, Parts::CreatedAt, Parts::LastUpdated);
        manager.create_table(parts).await?;

        let mut composite_parts = Table::create()
            .table(CompositeParts::Table)
            .if_not_exists()
            .col(ColumnDef::new(CompositeParts::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(CompositeParts::Name).string().not_null())
            .col(ColumnDef::new(CompositeParts::Description).text())
            .col(ColumnDef::new(CompositeParts::CompositeId).string().not_null())
            .col(ColumnDef::new(CompositeParts::CompositeType).string_len(32))
            .col(ColumnDef::new(CompositeParts::Sequence).text())
            .to_owned();
        timestamps(
            &mut composite_parts,
            CompositeParts::CreatedAt,
            CompositeParts::LastUpdated,
        );
        manager.create_table(composite_parts).await?;

        let mut collections = Table::create()
            .table(Collections::Table)
            .if_not_exists()
            .col(ColumnDef::new(Collections::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Collections::Name).string().not_null())
            .col(ColumnDef::new(Collections::Description).text().not_null())
            .col(ColumnDef::new(Collections::ParentId).uuid())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_collections_parent_id")
                    .from(Collections::Table, Collections::ParentId)
                    .to(Collections::Table, Collections::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .on_update(ForeignKeyAction::NoAction),
            )
            .to_owned();
        timestamps(&mut collections, Collections::CreatedAt, Collections::LastUpdated);
        manager.create_table(collections).await?;

        // Physical hierarchy
        let mut containers = Table::create()
            .table(Containers::Table)
            .if_not_exists()
            .col(ColumnDef::new(Containers::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Containers::Name).string().not_null())
            .col(ColumnDef::new(Containers::ContainerType).string_len(32).not_null())
            .col(ColumnDef::new(Containers::Description).text().not_null())
            .col(ColumnDef::new(Containers::EstimatedTemperature).decimal())
            .col(ColumnDef::new(Containers::X).decimal())
            .col(ColumnDef::new(Containers::Y).decimal())
            .col(ColumnDef::new(Containers::Z).decimal())
            .col(ColumnDef::new(Containers::ParentId).uuid())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_containers_parent_id")
                    .from(Containers::Table, Containers::ParentId)
                    .to(Containers::Table, Containers::Id)
                    .on_delete(ForeignKeyAction::NoAction)
                    .on_update(ForeignKeyAction::NoAction),
            )
            .to_owned();
        timestamps(&mut containers, Containers::CreatedAt, Containers::LastUpdated);
        manager.create_table(containers).await?;

        let mut modules = Table::create()
            .table(Modules::Table)
            .if_not_exists()
            .col(ColumnDef::new(Modules::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Modules::ContainerId).uuid().not_null())
            .col(ColumnDef::new(Modules::Name).string().not_null())
            .col(ColumnDef::new(Modules::Notes).text())
            .col(ColumnDef::new(Modules::ModelId).string().not_null())
            .col(ColumnDef::new(Modules::ModuleType).string_len(32).not_null())
            .col(ColumnDef::new(Modules::Data).json().not_null())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_modules_container_id")
                    .from(Modules::Table, Modules::ContainerId)
                    .to(Containers::Table, Containers::Id)
                    .on_delete(ForeignKeyAction::NoAction)
                    .on_update(ForeignKeyAction::NoAction),
            )
            .to_owned();
        timestamps(&mut modules, Modules::CreatedAt, Modules::LastUpdated);
        manager.create_table(modules).await?;

        let mut protocols = Table::create()
            .table(Protocols::Table)
            .if_not_exists()
            .col(ColumnDef::new(Protocols::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Protocols::Description).text().not_null())
            .col(ColumnDef::new(Protocols::Data).json().not_null())
            .to_owned();
        timestamps(&mut protocols, Protocols::CreatedAt, Protocols::LastUpdated);
        manager.create_table(protocols).await?;

        let mut plates = Table::create()
            .table(Plates::Table)
            .if_not_exists()
            .col(ColumnDef::new(Plates::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Plates::Name).string().not_null())
            .col(ColumnDef::new(Plates::PlateType).string_len(32).not_null())
            .col(ColumnDef::new(Plates::PlateForm).string_len(32).not_null())
            .col(ColumnDef::new(Plates::Status).string_len(32).not_null())
            .col(ColumnDef::new(Plates::PlateVendorId).string().unique_key())
            .col(ColumnDef::new(Plates::ThawCount).integer().not_null().default(0))
            .col(ColumnDef::new(Plates::Notes).text())
            .col(ColumnDef::new(Plates::Height).integer().not_null())
            .col(ColumnDef::new(Plates::Length).integer().not_null())
            .col(ColumnDef::new(Plates::ContainerId).uuid().not_null())
            .col(ColumnDef::new(Plates::ProtocolId).uuid())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_plates_container_id")
                    .from(Plates::Table, Plates::ContainerId)
                    .to(Containers::Table, Containers::Id)
                    .on_delete(ForeignKeyAction::NoAction)
                    .on_update(ForeignKeyAction::NoAction),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_plates_protocol_id")
                    .from(Plates::Table, Plates::ProtocolId)
                    .to(Protocols::Table, Protocols::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .on_update(ForeignKeyAction::NoAction),
            )
            .to_owned();
        timestamps(&mut plates, Plates::CreatedAt, Plates::LastUpdated);
        manager.create_table(plates).await?;

        let mut wells = Table::create()
            .table(Wells::Table)
            .if_not_exists()
            .col(ColumnDef::new(Wells::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Wells::Address).string_len(32).not_null())
            .col(ColumnDef::new(Wells::Volume).decimal().not_null().default(0))
            .col(ColumnDef::new(Wells::Quantity).integer())
            .col(ColumnDef::new(Wells::Media).string())
            .col(ColumnDef::new(Wells::OrganismId).uuid())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_wells_organism_id")
                    .from(Wells::Table, Wells::OrganismId)
                    .to(Organisms::Table, Organisms::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .on_update(ForeignKeyAction::NoAction),
            )
            .to_owned();
        timestamps(&mut wells, Wells::CreatedAt, Wells::LastUpdated);
        manager.create_table(wells).await?;

        manager
            .create_table(
                Table::create()
                    .table(PlateWells::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PlateWells::PlateId).uuid().not_null())
                    .col(ColumnDef::new(PlateWells::WellId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(PlateWells::PlateId)
                            .col(PlateWells::WellId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plate_wells_plate_id")
                            .from(PlateWells::Table, PlateWells::PlateId)
                            .to(Plates::Table, Plates::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plate_wells_well_id")
                            .from(PlateWells::Table, PlateWells::WellId)
                            .to(Wells::Table, Wells::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        let mut samples = Table::create()
            .table(Samples::Table)
            .if_not_exists()
            .col(ColumnDef::new(Samples::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Samples::SampleType).string_len(32))
            .col(ColumnDef::new(Samples::Status).string_len(32))
            .col(ColumnDef::new(Samples::Evidence).string_len(32))
            .col(ColumnDef::new(Samples::Vendor).string())
            .col(
                ColumnDef::new(Samples::OutsideCollaborator)
                    .boolean()
                    .not_null()
                    .default(true),
            )
            .col(ColumnDef::new(Samples::IndexForward).text())
            .col(ColumnDef::new(Samples::IndexReverse).text())
            .col(ColumnDef::new(Samples::DerivedFrom).uuid())
            .col(ColumnDef::new(Samples::PartId).uuid())
            .col(ColumnDef::new(Samples::CompositePartId).uuid())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_samples_derived_from")
                    .from(Samples::Table, Samples::DerivedFrom)
                    .to(Samples::Table, Samples::Id)
                    .on_delete(ForeignKeyAction::Restrict),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_samples_part_id")
                    .from(Samples::Table, Samples::PartId)
                    .to(Parts::Table, Parts::Id)
                    .on_delete(ForeignKeyAction::Restrict),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_samples_composite_part_id")
                    .from(Samples::Table, Samples::CompositePartId)
                    .to(CompositeParts::Table, CompositeParts::Id)
                    .on_delete(ForeignKeyAction::Restrict),
            )
            .to_owned();
        timestamps(&mut samples, Samples::CreatedAt, Samples::LastUpdated);
        manager.create_table(samples).await?;

        manager
            .create_table(
                Table::create()
                    .table(SampleWells::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SampleWells::SampleId).uuid().not_null())
                    .col(ColumnDef::new(SampleWells::WellId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(SampleWells::SampleId)
                            .col(SampleWells::WellId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sample_wells_sample_id")
                            .from(SampleWells::Table, SampleWells::SampleId)
                            .to(Samples::Table, Samples::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sample_wells_well_id")
                            .from(SampleWells::Table, SampleWells::WellId)
                            .to(Wells::Table, Wells::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Aggregation layers
        let mut platesets = Table::create()
            .table(Platesets::Table)
            .if_not_exists()
            .col(ColumnDef::new(Platesets::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Platesets::Name).string().not_null())
            .col(ColumnDef::new(Platesets::Description).text().not_null())
            .to_owned();
        timestamps(&mut platesets, Platesets::CreatedAt, Platesets::LastUpdated);
        manager.create_table(platesets).await?;

        manager
            .create_table(
                Table::create()
                    .table(PlatesetPlates::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PlatesetPlates::PlatesetId).uuid().not_null())
                    .col(ColumnDef::new(PlatesetPlates::PlateId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(PlatesetPlates::PlatesetId)
                            .col(PlatesetPlates::PlateId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plateset_plates_plateset_id")
                            .from(PlatesetPlates::Table, PlatesetPlates::PlatesetId)
                            .to(Platesets::Table, Platesets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plateset_plates_plate_id")
                            .from(PlatesetPlates::Table, PlatesetPlates::PlateId)
                            .to(Plates::Table, Plates::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        let mut distributions = Table::create()
            .table(Distributions::Table)
            .if_not_exists()
            .col(ColumnDef::new(Distributions::Id).uuid().not_null().primary_key())
            .col(ColumnDef::new(Distributions::Name).string().not_null())
            .col(ColumnDef::new(Distributions::Description).text().not_null())
            .to_owned();
        timestamps(
            &mut distributions,
            Distributions::CreatedAt,
            Distributions::LastUpdated,
        );
        manager.create_table(distributions).await?;

        manager
            .create_table(
                Table::create()
                    .table(DistributionPlatesets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DistributionPlatesets::DistributionId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DistributionPlatesets::PlatesetId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(DistributionPlatesets::DistributionId)
                            .col(DistributionPlatesets::PlatesetId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_distribution_platesets_distribution_id")
                            .from(
                                DistributionPlatesets::Table,
                                DistributionPlatesets::DistributionId,
                            )
                            .to(Distributions::Table, Distributions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_distribution_platesets_plateset_id")
                            .from(
                                DistributionPlatesets::Table,
                                DistributionPlatesets::PlatesetId,
                            )
                            .to(Platesets::Table, Platesets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        let mut mtas = Table::create()
            .table(MaterialTransferAgreements::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(MaterialTransferAgreements::Id)
                    .uuid()
                    .not_null()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(MaterialTransferAgreements::MtaType)
                    .string_len(32)
                    .not_null(),
            )
            .col(ColumnDef::new(MaterialTransferAgreements::AgreementFile).string())
            .col(
                ColumnDef::new(MaterialTransferAgreements::InstitutionId)
                    .uuid()
                    .not_null(),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_mtas_institution_id")
                    .from(
                        MaterialTransferAgreements::Table,
                        MaterialTransferAgreements::InstitutionId,
                    )
                    .to(Institutions::Table, Institutions::Id)
                    .on_delete(ForeignKeyAction::NoAction),
            )
            .to_owned();
        timestamps(
            &mut mtas,
            MaterialTransferAgreements::CreatedAt,
            MaterialTransferAgreements::LastUpdated,
        );
        manager.create_table(mtas).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parts_gene_id")
                    .table(Parts::Table)
                    .col(Parts::GeneId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_containers_parent_id")
                    .table(Containers::Table)
                    .col(Containers::ParentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_samples_derived_from")
                    .table(Samples::Table)
                    .col(Samples::DerivedFrom)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse dependency order
        manager.drop_table(Table::drop().table(MaterialTransferAgreements::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(DistributionPlatesets::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Distributions::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(PlatesetPlates::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Platesets::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(SampleWells::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Samples::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(PlateWells::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Wells::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Plates::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Protocols::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Modules::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Containers::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Collections::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(CompositeParts::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Parts::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Organisms::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Institutions::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Authors::Table).if_exists().to_owned()).await?;
        manager.drop_table(Table::drop().table(Tags::Table).if_exists().to_owned()).await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Tags {
    Table,
    Id,
    Tag,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
pub(crate) enum Authors {
    Table,
    Id,
    Name,
    Email,
    Affiliation,
    Orcid,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Institutions {
    Table,
    Id,
    Name,
    SignedMaster,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
pub(crate) enum Organisms {
    Table,
    Id,
    Name,
    Description,
    Genotype,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
pub(crate) enum Parts {
    Table,
    Id,
    Name,
    Description,
    GeneId,
    PartType,
    Status,
    OriginalSequence,
    OptimizedSequence,
    SynthesizedSequence,
    FullSequence,
    Genbank,
    Vector,
    PrimerForward,
    PrimerReverse,
    Barcode,
    Translation,
    IpCheck,
    IpCheckDate,
    IpCheckRef,
    AuthorId,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
pub(crate) enum CompositeParts {
    Table,
    Id,
    Name,
    Description,
    CompositeId,
    CompositeType,
    Sequence,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
pub(crate) enum Collections {
    Table,
    Id,
    Name,
    Description,
    ParentId,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Containers {
    Table,
    Id,
    Name,
    ContainerType,
    Description,
    EstimatedTemperature,
    X,
    Y,
    Z,
    ParentId,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Modules {
    Table,
    Id,
    ContainerId,
    Name,
    Notes,
    ModelId,
    ModuleType,
    Data,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Protocols {
    Table,
    Id,
    Description,
    Data,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Plates {
    Table,
    Id,
    Name,
    PlateType,
    PlateForm,
    Status,
    PlateVendorId,
    ThawCount,
    Notes,
    Height,
    Length,
    ContainerId,
    ProtocolId,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum Wells {
    Table,
    Id,
    Address,
    Volume,
    Quantity,
    Media,
    OrganismId,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum PlateWells {
    Table,
    PlateId,
    WellId,
}

#[derive(DeriveIden)]
enum Samples {
    Table,
    Id,
    SampleType,
    Status,
    Evidence,
    Vendor,
    OutsideCollaborator,
    IndexForward,
    IndexReverse,
    DerivedFrom,
    PartId,
    CompositePartId,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum SampleWells {
    Table,
    SampleId,
    WellId,
}

#[derive(DeriveIden)]
enum Platesets {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum PlatesetPlates {
    Table,
    PlatesetId,
    PlateId,
}

#[derive(DeriveIden)]
pub(crate) enum Distributions {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    LastUpdated,
}

#[derive(DeriveIden)]
enum DistributionPlatesets {
    Table,
    DistributionId,
    PlatesetId,
}

#[derive(DeriveIden)]
pub(crate) enum MaterialTransferAgreements {
    Table,
    Id,
    MtaType,
    AgreementFile,
    InstitutionId,
    CreatedAt,
    LastUpdated,
}
